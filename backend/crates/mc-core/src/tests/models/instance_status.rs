use crate::{InstanceId, InstanceStatus, ServerState};

use chrono::{Duration, Utc};

#[test]
fn test_new_status_is_stopped_without_process() {
    let status = InstanceStatus::new(InstanceId::new(), "survival");

    assert_eq!(status.state, ServerState::Stopped);
    assert_eq!(status.pid, None);
    assert_eq!(status.uptime_secs, None);
    assert_eq!(status.name, "survival");
}

#[test]
fn given_running_status_when_at_then_uptime_computed() {
    let now = Utc::now();
    let mut status = InstanceStatus::new(InstanceId::new(), "survival");
    status.state = ServerState::Running;
    status.started_at = Some(now - Duration::seconds(90));

    assert_eq!(status.at(now).uptime_secs, Some(90));
}

#[test]
fn given_stopped_status_with_stale_start_when_at_then_no_uptime() {
    let now = Utc::now();
    let mut status = InstanceStatus::new(InstanceId::new(), "survival");
    status.started_at = Some(now - Duration::seconds(90));

    assert_eq!(status.at(now).uptime_secs, None);
}
