use crate::{InstanceId, LogEntry, LogSeverity, LogStream, ServerEvent, ServerState};

use chrono::Utc;

#[test]
fn test_status_changed_is_tagged() {
    let event = ServerEvent::StatusChanged {
        instance_id: InstanceId::new(),
        from: ServerState::Starting,
        to: ServerState::Running,
        at: Utc::now(),
    };

    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "status_changed");
    assert_eq!(json["from"], "starting");
    assert_eq!(json["to"], "running");
    assert_eq!(event.event_type(), "status_changed");
}

#[test]
fn test_log_event_embeds_entry() {
    let entry = LogEntry::new(3, "hello", LogSeverity::Warning, LogStream::Stderr);
    let json = serde_json::to_value(ServerEvent::Log { entry }).unwrap();

    assert_eq!(json["type"], "log");
    assert_eq!(json["entry"]["sequence"], 3);
    assert_eq!(json["entry"]["severity"], "warning");
    assert_eq!(json["entry"]["stream"], "stderr");
}

#[test]
fn test_crashed_event_round_trips() {
    let event = ServerEvent::Crashed {
        instance_id: InstanceId::new(),
        exit_code: Some(137),
        at: Utc::now(),
    };

    let json = serde_json::to_string(&event).unwrap();
    let parsed: ServerEvent = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, event);
}
