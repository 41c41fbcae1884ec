use crate::{Result as WsResult, WsError};

use std::collections::HashMap;

use axum::http::HeaderMap;
use log::debug;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ID_PARAM: &str = "user_id";
pub const MAX_USER_ID_LEN: usize = 64;

/// Resolve who is on the other end of a console stream.
///
/// Order: `X-User-Id` header, `user_id` query parameter, then `default_user_id`.
/// The id is used for attribution only; this service does not authenticate.
pub fn extract_user_id(
    headers: &HeaderMap,
    query_params: &HashMap<String, String>,
    default_user_id: &str,
) -> WsResult<String> {
    let provided = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .or_else(|| query_params.get(USER_ID_PARAM).map(String::as_str))
        .map(str::trim);

    match provided {
        Some(user_id) => validate_user_id(user_id),
        None => {
            debug!("No user id supplied, using '{}'", default_user_id);
            Ok(default_user_id.to_string())
        }
    }
}

pub fn validate_user_id(user_id: &str) -> WsResult<String> {
    if user_id.is_empty() {
        return Err(WsError::invalid_message("user_id cannot be empty"));
    }

    if user_id.chars().count() > MAX_USER_ID_LEN {
        return Err(WsError::invalid_message(format!(
            "user_id exceeds {} characters",
            MAX_USER_ID_LEN
        )));
    }

    if user_id.chars().any(char::is_control) {
        return Err(WsError::invalid_message(
            "user_id contains control characters",
        ));
    }

    Ok(user_id.to_string())
}
