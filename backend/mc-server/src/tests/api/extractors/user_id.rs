use crate::UserId;

use mc_config::{BroadcastConfig, CommandConfig, InstanceConfig, StatsConfig};
use mc_supervisor::{
    AllowListValidator, CommandGateway, EventBroadcaster, ProcessSupervisor, SupervisorOptions,
};
use mc_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics, ShutdownCoordinator,
};

use std::sync::Arc;

use axum::extract::FromRequestParts;
use http::Request;

const DEFAULT_USER: &str = "web-console";

fn app_state() -> AppState {
    let instance = InstanceConfig::default();
    let options = SupervisorOptions::from_config(&instance, &StatsConfig::default());
    let supervisor = ProcessSupervisor::new(
        instance,
        EventBroadcaster::new(&BroadcastConfig::default()),
        options,
    );
    let validator = Arc::new(AllowListValidator::from_config(&CommandConfig::default()));

    AppState {
        gateway: CommandGateway::new(supervisor.clone(), validator),
        supervisor,
        registry: ConnectionRegistry::new(ConnectionLimits::default()),
        metrics: Metrics::new(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
        default_user_id: DEFAULT_USER.to_string(),
        metrics_handle: None,
    }
}

async fn extract(header: Option<&str>) -> Result<UserId, crate::ApiError> {
    let mut builder = Request::builder().uri("/api/server/command");
    if let Some(value) = header {
        builder = builder.header("X-User-Id", value);
    }
    let (mut parts, _) = builder.body(()).unwrap().into_parts();

    UserId::from_request_parts(&mut parts, &app_state()).await
}

#[tokio::test]
async fn given_no_header_when_extracting_then_default_user() {
    let UserId(user_id) = extract(None).await.unwrap();

    assert_eq!(user_id, DEFAULT_USER);
}

#[tokio::test]
async fn given_header_when_extracting_then_header_user() {
    let UserId(user_id) = extract(Some("alice")).await.unwrap();

    assert_eq!(user_id, "alice");
}

#[tokio::test]
async fn given_blank_header_when_extracting_then_bad_request() {
    let result = extract(Some("   ")).await;

    let err = result.err().unwrap();
    assert_eq!(err.code(), "BAD_REQUEST");
}

#[tokio::test]
async fn given_overlong_header_when_extracting_then_bad_request() {
    let long = "x".repeat(200);

    let result = extract(Some(long.as_str())).await;

    assert!(result.is_err());
}
