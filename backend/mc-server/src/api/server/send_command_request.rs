use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SendCommandRequest {
    pub command: String,
    /// Echoed back so callers can match the response; generated when absent
    #[serde(default)]
    pub correlation_id: Option<Uuid>,
}
