use crate::{CoreError, ServerState};

use std::str::FromStr;

use proptest::prelude::*;

const ALL_STATES: [ServerState; 5] = [
    ServerState::Stopped,
    ServerState::Starting,
    ServerState::Running,
    ServerState::Stopping,
    ServerState::Crashed,
];

#[test]
fn test_server_state_as_str() {
    assert_eq!(ServerState::Stopped.as_str(), "stopped");
    assert_eq!(ServerState::Starting.as_str(), "starting");
    assert_eq!(ServerState::Running.as_str(), "running");
    assert_eq!(ServerState::Stopping.as_str(), "stopping");
    assert_eq!(ServerState::Crashed.as_str(), "crashed");
}

#[test]
fn test_server_state_from_str() {
    for state in ALL_STATES {
        assert_eq!(ServerState::from_str(state.as_str()).unwrap(), state);
    }
}

#[test]
fn test_server_state_from_str_invalid() {
    let result = ServerState::from_str("paused");
    assert!(matches!(result, Err(CoreError::InvalidServerState { .. })));
}

#[test]
fn test_server_state_serializes_snake_case() {
    let json = serde_json::to_string(&ServerState::Crashed).unwrap();
    assert_eq!(json, "\"crashed\"");
}

#[test]
fn given_normal_lifecycle_when_walked_then_every_step_allowed() {
    let path = [
        ServerState::Stopped,
        ServerState::Starting,
        ServerState::Running,
        ServerState::Stopping,
        ServerState::Stopped,
    ];

    for pair in path.windows(2) {
        assert!(
            pair[0].can_transition_to(pair[1]),
            "{} -> {} should be allowed",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn given_live_states_when_crash_then_allowed() {
    for state in [
        ServerState::Starting,
        ServerState::Running,
        ServerState::Stopping,
    ] {
        assert!(state.can_transition_to(ServerState::Crashed));
    }
}

#[test]
fn given_stopped_when_crash_then_rejected() {
    assert!(!ServerState::Stopped.can_transition_to(ServerState::Crashed));
}

#[test]
fn given_crashed_when_acknowledged_or_relaunched_then_allowed() {
    assert!(ServerState::Crashed.can_transition_to(ServerState::Stopped));
    assert!(ServerState::Crashed.can_transition_to(ServerState::Starting));
    assert!(!ServerState::Crashed.can_transition_to(ServerState::Running));
}

#[test]
fn given_running_when_jump_to_stopped_then_rejected() {
    let result = ServerState::Running.transition_to(ServerState::Stopped);
    assert!(matches!(
        result,
        Err(CoreError::InvalidTransition {
            from: ServerState::Running,
            to: ServerState::Stopped,
            ..
        })
    ));
}

#[test]
fn test_can_start_only_from_stopped_or_crashed() {
    let startable: Vec<_> = ALL_STATES.iter().filter(|s| s.can_start()).collect();
    assert_eq!(startable, vec![&ServerState::Stopped, &ServerState::Crashed]);
}

#[test]
fn test_no_self_transitions() {
    for state in ALL_STATES {
        assert!(!state.can_transition_to(state), "{state} -> {state}");
    }
}

proptest! {
    #[test]
    fn given_any_pair_when_transition_to_then_agrees_with_can_transition(
        from in 0usize..5,
        to in 0usize..5,
    ) {
        let from = ALL_STATES[from];
        let to = ALL_STATES[to];
        prop_assert_eq!(from.transition_to(to).is_ok(), from.can_transition_to(to));
    }
}
