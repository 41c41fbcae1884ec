use crate::ApiError;

use mc_core::ServerState;
use mc_supervisor::SupervisorError;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_running_when_rendered_then_409_with_code() {
    let error = ApiError::from(SupervisorError::not_running(ServerState::Stopped));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "NOT_RUNNING");
    assert_eq!(
        json["error"]["message"],
        "Server is not running (state: stopped)"
    );
}

#[tokio::test]
async fn given_rejected_command_when_rendered_then_400_with_code() {
    let error = ApiError::from(SupervisorError::rejected("op alice", "'op' is not allowed"));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "REJECTED");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("op alice")
    );
}

#[tokio::test]
async fn given_launch_failure_when_rendered_then_500_with_code() {
    let error = ApiError::from(SupervisorError::launch("game port 25565 is already in use"));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "LAUNCH_ERROR");
}

#[tokio::test]
async fn given_invalid_property_when_rendered_then_400_with_code() {
    let error = ApiError::from(SupervisorError::invalid_property(
        "server-port",
        "managed by instance.game_port (25565)",
    ));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_PROPERTY");
    assert_eq!(
        json["error"]["message"],
        "Invalid server property 'server-port': managed by instance.game_port (25565)"
    );
}

#[tokio::test]
async fn given_properties_io_failure_when_rendered_then_500_with_code() {
    let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = ApiError::from(SupervisorError::properties_io("cannot write", source));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "PROPERTIES_ERROR");
}

#[tokio::test]
async fn given_bad_request_when_rendered_then_400_bad_request_code() {
    let (status, json) = body_json(ApiError::bad_request("Invalid stop request")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["message"], "Invalid stop request");
}

#[test]
fn given_supervisor_error_when_mapped_then_message_has_no_location() {
    let error = ApiError::from(SupervisorError::not_running(ServerState::Crashed));

    match error {
        ApiError::Conflict { message, .. } => assert!(!message.contains(".rs:")),
        other => panic!("unexpected mapping: {:?}", other),
    }
}
