//! Axum extractor attributing REST requests to a user

use crate::ApiError;

use mc_ws::{AppState, USER_ID_HEADER, validate_user_id};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Identity a console command is attributed to.
///
/// Taken from the `X-User-Id` header, falling back to the configured
/// default user. A header that is present but malformed is rejected.
pub struct UserId(pub String);

impl FromRequestParts<AppState> for UserId {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Some(header_value) = parts.headers.get(USER_ID_HEADER) else {
                log::debug!("Using default user ID: {}", state.default_user_id);
                return Ok(UserId(state.default_user_id.clone()));
            };

            let raw = header_value
                .to_str()
                .map_err(|_| ApiError::bad_request("X-User-Id must be visible ASCII"))?;

            validate_user_id(raw.trim())
                .map(UserId)
                .map_err(|e| {
                    log::warn!("Invalid X-User-Id header: {}", e);
                    ApiError::bad_request(format!("Invalid X-User-Id header: {}", raw.trim()))
                })
        }
    }
}
