use crate::{LogSeverity, SeverityRules};

use proptest::prelude::*;

#[test]
fn test_plain_line_is_info() {
    let rules = SeverityRules::default();
    assert_eq!(
        rules.classify("[12:00:01] [Server thread/INFO]: Preparing spawn area: 42%"),
        LogSeverity::Info
    );
}

#[test]
fn test_warn_level_line_is_warning() {
    let rules = SeverityRules::default();
    assert_eq!(
        rules.classify("[12:00:01] [Server thread/WARN]: Can't keep up!"),
        LogSeverity::Warning
    );
}

#[test]
fn test_error_keywords_are_case_insensitive() {
    let rules = SeverityRules::default();
    assert_eq!(rules.classify("java.lang.NullPointerException"), LogSeverity::Error);
    assert_eq!(rules.classify("[Server thread/ERROR]: oops"), LogSeverity::Error);
    assert_eq!(rules.classify("SEVERE: world corrupted"), LogSeverity::Error);
}

#[test]
fn given_line_matching_two_rules_when_classified_then_first_rule_wins() {
    // "error" precedes "warn" in the default table
    let rules = SeverityRules::default();
    assert_eq!(
        rules.classify("[WARN] recovered from error"),
        LogSeverity::Error
    );
}

#[test]
fn given_custom_table_when_classified_then_table_order_applies() {
    let rules = SeverityRules::new(vec![
        (String::from("Lag"), LogSeverity::Warning),
        (String::from("lagging"), LogSeverity::Error),
    ]);
    assert_eq!(rules.classify("server is LAGGING"), LogSeverity::Warning);
}

#[test]
fn given_empty_table_when_classified_then_info() {
    let rules = SeverityRules::new(Vec::new());
    assert_eq!(rules.classify("fatal error"), LogSeverity::Info);
}

proptest! {
    #[test]
    fn given_digits_only_when_classified_then_info(line in "[0-9 :]{0,40}") {
        prop_assert_eq!(SeverityRules::default().classify(&line), LogSeverity::Info);
    }
}
