use std::collections::BTreeMap;

use serde::Serialize;

/// `server.properties` as stored, next to the template for new instances.
#[derive(Debug, Serialize)]
pub struct ServerConfigResponse {
    pub config: BTreeMap<String, String>,
    pub default_config: BTreeMap<String, String>,
}
