#![allow(dead_code)]

//! Test infrastructure for mc-server API tests

use mc_config::{BroadcastConfig, CommandConfig, InstanceConfig, StatsConfig};
use mc_core::ServerState;
use mc_supervisor::{
    AllowListValidator, CommandGateway, EventBroadcaster, ProcessSupervisor, SupervisorOptions,
};
use mc_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics, ShutdownCoordinator,
};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_USER_ID: &str = "test-console";
pub const STATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Prints the vanilla ready line, then serves `list` and `stop`.
pub const READY_SERVER: &str = r#"
echo "[Server thread/INFO]: Done (0.100s)! For help, type \"help\""
while IFS= read -r line; do
  case "$line" in
    stop) exit 0 ;;
    list) echo "[Server thread/INFO]: There are 0 of a max of 20 players online:" ;;
  esac
done
"#;

/// AppState plus the scratch directory the instance runs in
pub struct TestApp {
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        mc_server::build_router(self.state.clone())
    }

    pub async fn wait_for(&self, target: ServerState) -> bool {
        self.state
            .supervisor
            .wait_for_state(target, STATE_TIMEOUT)
            .await
    }
}

/// Create AppState for testing, supervising `script` through `sh -c`
pub fn create_test_app(script: &str) -> TestApp {
    create_test_app_with_command(vec![
        String::from("sh"),
        String::from("-c"),
        script.to_string(),
    ])
}

/// Create AppState for testing with an explicit command line
pub fn create_test_app_with_command(command: Vec<String>) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let instance = InstanceConfig {
        name: String::from("api-test"),
        working_dir: dir.path().join("server").to_string_lossy().into_owned(),
        command: Some(command),
        check_port: false,
        startup_timeout_secs: 10,
        shutdown_timeout_secs: 5,
        kill_timeout_secs: 1,
        ..InstanceConfig::default()
    };
    let stats = StatsConfig {
        enabled: false,
        ..StatsConfig::default()
    };

    let options = SupervisorOptions::from_config(&instance, &stats);
    let supervisor = ProcessSupervisor::new(
        instance,
        EventBroadcaster::new(&BroadcastConfig::default()),
        options,
    );
    let validator = Arc::new(AllowListValidator::from_config(&CommandConfig::default()));

    let state = AppState {
        gateway: CommandGateway::new(supervisor.clone(), validator),
        supervisor,
        registry: ConnectionRegistry::new(ConnectionLimits { max_total: 100 }),
        metrics: Metrics::new(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
        default_user_id: TEST_USER_ID.to_string(),
        metrics_handle: None,
    };

    TestApp { state, dir }
}

/// Send one request through the router, returning status and JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
