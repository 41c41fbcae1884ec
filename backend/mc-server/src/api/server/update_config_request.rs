use crate::{ApiError, ApiResult};

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Body of POST /api/server/config.
#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    #[serde(default)]
    pub config: BTreeMap<String, Value>,
}

impl UpdateConfigRequest {
    /// Property values as written to the file. Numbers and booleans are
    /// accepted in their JSON form.
    pub fn into_properties(self) -> ApiResult<BTreeMap<String, String>> {
        self.config
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(ApiError::bad_request(format!(
                            "Property '{}' must be a string, number or boolean, got {}",
                            key, other
                        )));
                    }
                };
                Ok((key, value))
            })
            .collect()
    }
}
