#![allow(dead_code)]

use mc_config::{BroadcastConfig, CommandConfig, InstanceConfig, StatsConfig};
use mc_supervisor::{
    AllowListValidator, CommandGateway, EventBroadcaster, ProcessSupervisor, SupervisorOptions,
};
use mc_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics, ShutdownCoordinator,
};

use std::sync::Arc;

use axum::{Router, routing::get};
use axum_test::TestServer;
use tempfile::TempDir;

pub const TEST_DEFAULT_USER_ID: &str = "test-console";

/// Prints the vanilla ready line, then echoes console commands.
pub const READY_SERVER: &str = r#"
echo "[Server thread/INFO]: Done (0.100s)! For help, type \"help\""
while IFS= read -r line; do
  case "$line" in
    stop) exit 0 ;;
    list) echo "[Server thread/INFO]: There are 0 of a max of 20 players online:" ;;
    *) echo "[Server thread/INFO]: Unknown or incomplete command: $line" ;;
  esac
done
"#;

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub default_user_id: String,
    pub max_connections_total: usize,
    /// Shell script standing in for the game server
    pub script: String,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            default_user_id: TEST_DEFAULT_USER_ID.to_string(),
            max_connections_total: 100,
            script: READY_SERVER.to_string(),
        }
    }
}

impl TestServerConfig {
    /// Create config with strict connection limits (for limit tests)
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections_total: 2,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
    /// Working directory of the supervised process, removed on drop
    pub dir: TempDir,
}

/// Create a TestServer with default configuration
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

/// Create a TestServer with custom configuration
pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let (app, app_state) = create_app(config, &dir);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState {
        server,
        app_state,
        dir,
    }
}

/// Build the Axum Router with AppState
fn create_app(config: TestServerConfig, dir: &TempDir) -> (Router, AppState) {
    let instance = InstanceConfig {
        name: String::from("ws-test"),
        working_dir: dir.path().join("server").to_string_lossy().into_owned(),
        command: Some(vec![
            String::from("sh"),
            String::from("-c"),
            config.script.clone(),
        ]),
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
    let broadcaster = EventBroadcaster::new(&BroadcastConfig::default());
    let supervisor = ProcessSupervisor::new(instance, broadcaster, options);
    let validator = Arc::new(AllowListValidator::from_config(&CommandConfig::default()));
    let gateway = CommandGateway::new(supervisor.clone(), validator);

    let registry = ConnectionRegistry::new(ConnectionLimits {
        max_total: config.max_connections_total,
    });

    let app_state = AppState {
        supervisor,
        gateway,
        registry,
        metrics: Metrics::default(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
        default_user_id: config.default_user_id,
        metrics_handle: None,
    };

    let router = Router::new()
        .route("/ws", get(mc_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
