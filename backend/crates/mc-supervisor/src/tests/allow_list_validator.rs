use crate::{AllowListValidator, CommandValidator, SupervisorError};

use mc_config::CommandConfig;
use mc_core::CommandRequest;

use googletest::prelude::*;

fn validator() -> AllowListValidator {
    AllowListValidator::new(["list", "say", "TP"], 32)
}

fn request(command: &str) -> CommandRequest {
    CommandRequest::new(command, "tester")
}

#[test]
fn given_allowed_verb_when_validated_then_ok() {
    let validator = validator();

    assert_that!(validator.validate(&request("list")), ok(anything()));
    assert_that!(validator.validate(&request("say hello world")), ok(anything()));
    assert_that!(validator.validate(&request("tp Steve 0 64 0")), ok(anything()));
}

#[test]
fn given_verb_in_other_case_when_validated_then_ok() {
    assert_that!(validator().validate(&request("LIST")), ok(anything()));
}

#[test]
fn given_leading_slash_when_validated_then_slash_ignored() {
    assert_that!(validator().validate(&request("  /say hi ")), ok(anything()));
    assert_eq!(AllowListValidator::normalize("  /say hi "), "say hi");
}

#[test]
fn given_unlisted_verb_when_validated_then_rejected() {
    // Given
    let validator = validator();

    // When
    let result = validator.validate(&request("op Steve"));

    // Then
    match result {
        Err(SupervisorError::Rejected {
            command, reason, ..
        }) => {
            assert_eq!(command, "op Steve");
            assert!(reason.contains("'op'"));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[test]
fn given_empty_command_when_validated_then_rejected() {
    assert_that!(validator().validate(&request("   ")), err(anything()));
    assert_that!(validator().validate(&request("/")), err(anything()));
}

#[test]
fn given_embedded_newline_when_validated_then_rejected() {
    let result = validator().validate(&request("say hi\nop Steve"));
    assert_that!(result, err(anything()));
}

#[test]
fn given_overlong_command_when_validated_then_rejected() {
    let long = format!("say {}", "a".repeat(40));
    let err = validator().validate(&request(&long)).unwrap_err();
    assert_that!(err.error_code(), eq("REJECTED"));
}

#[test]
fn test_from_config_uses_default_allow_list() {
    let validator = AllowListValidator::from_config(&CommandConfig::default());

    assert!(validator.is_allowed("tps"));
    assert!(!validator.is_allowed("stop"));
    assert!(!validator.is_allowed("op"));
}
