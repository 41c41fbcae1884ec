//! Integration tests for the server lifecycle API
mod common;

use crate::common::{
    READY_SERVER, create_test_app, create_test_app_with_command, get, post_empty, post_json, send,
};

use mc_core::{LogStream, ServerState};

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_status_when_stopped() {
    let app = create_test_app(READY_SERVER);

    let (status, json) = send(app.router(), get("/api/server/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "stopped");
    assert_eq!(json["name"], "api-test");
    assert!(json["pid"].is_null());
    assert!(json["stats"].is_null());
    assert_eq!(json["logs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_logs_respects_limit() {
    let app = create_test_app(READY_SERVER);
    let broadcaster = app.state.supervisor.broadcaster().clone();
    for i in 0..5 {
        broadcaster
            .publish_line(&format!("line {}", i), LogStream::Stdout)
            .await;
    }

    let (status, json) = send(app.router(), get("/api/server/logs?limit=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["entries"][0]["message"], "line 3");
    assert_eq!(json["entries"][1]["message"], "line 4");
}

#[tokio::test]
async fn test_stats_null_before_first_sample() {
    let app = create_test_app(READY_SERVER);

    let (status, json) = send(app.router(), get("/api/server/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["stats"].is_null());
}

#[tokio::test]
async fn test_players_empty_when_stopped() {
    let app = create_test_app(READY_SERVER);

    let (status, json) = send(app.router(), get("/api/server/players")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert_eq!(json["players"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_command_when_stopped_returns_409() {
    let app = create_test_app(READY_SERVER);

    let (status, json) = send(
        app.router(),
        post_json("/api/server/command", json!({ "command": "list" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "NOT_RUNNING");
}

#[tokio::test]
async fn test_stop_when_stopped_is_idempotent() {
    let app = create_test_app(READY_SERVER);

    let (status, json) = send(app.router(), post_empty("/api/server/stop")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["outcome"], "already_stopped");
    assert_eq!(json["state"], "stopped");
}

#[tokio::test]
async fn test_stop_with_malformed_body_returns_400() {
    let app = create_test_app(READY_SERVER);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/server/stop")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{graceful"))
        .unwrap();
    let (status, json) = send(app.router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_start_with_missing_binary_returns_500_and_stays_stopped() {
    let app = create_test_app_with_command(vec![String::from("/nonexistent/minecraft-server")]);

    let (status, json) = send(app.router(), post_empty("/api/server/start")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "LAUNCH_ERROR");
    assert_eq!(app.state.supervisor.state(), ServerState::Stopped);
}

#[cfg(unix)]
#[tokio::test]
async fn test_start_command_stop_round_trip() {
    // Start
    let app = create_test_app(READY_SERVER);
    let (status, json) = send(app.router(), post_empty("/api/server/start")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(app.wait_for(ServerState::Running).await);

    // Second start conflicts
    let (status, json) = send(app.router(), post_empty("/api/server/start")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "ALREADY_RUNNING");

    // Allowed command is acked and attributed
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/server/command")
        .header("content-type", "application/json")
        .header("X-User-Id", "alice")
        .body(axum::body::Body::from(json!({ "command": "list" }).to_string()))
        .unwrap();
    let (status, json) = send(app.router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["user_id"], "alice");

    // Disallowed command is rejected
    let (status, json) = send(
        app.router(),
        post_json("/api/server/command", json!({ "command": "op alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "REJECTED");

    // Graceful stop
    let (status, json) = send(
        app.router(),
        post_json("/api/server/stop", json!({ "graceful": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "graceful");
    assert_eq!(json["state"], "stopped");
}
