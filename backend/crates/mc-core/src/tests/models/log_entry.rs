use crate::{LogEntry, LogSeverity, LogStream};

#[test]
fn test_log_entry_strips_line_terminators() {
    let entry = LogEntry::new(7, "Done (3.2s)!\r\n", LogSeverity::Info, LogStream::Stdout);

    assert_eq!(entry.sequence, 7);
    assert_eq!(entry.message, "Done (3.2s)!");
    assert_eq!(entry.stream, LogStream::Stdout);
}

#[test]
fn test_log_entry_keeps_inner_whitespace() {
    let entry = LogEntry::new(1, "  indented  \n", LogSeverity::Info, LogStream::Stderr);
    assert_eq!(entry.message, "  indented  ");
}
