use crate::LogSeverity;

/// Ordered keyword table used to classify console lines.
///
/// Matching is a case-insensitive substring search; the first rule that
/// matches wins. Lines matching no rule are `Info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRules {
    rules: Vec<(String, LogSeverity)>,
    fallback: LogSeverity,
}

impl SeverityRules {
    pub fn new(rules: Vec<(String, LogSeverity)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(keyword, severity)| (keyword.to_lowercase(), severity))
                .collect(),
            fallback: LogSeverity::Info,
        }
    }

    pub fn classify(&self, line: &str) -> LogSeverity {
        let lowered = line.to_lowercase();

        self.rules
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword.as_str()))
            .map(|(_, severity)| *severity)
            .unwrap_or(self.fallback)
    }

    pub fn rules(&self) -> &[(String, LogSeverity)] {
        &self.rules
    }
}

impl Default for SeverityRules {
    fn default() -> Self {
        Self::new(vec![
            (String::from("error"), LogSeverity::Error),
            (String::from("exception"), LogSeverity::Error),
            (String::from("severe"), LogSeverity::Error),
            (String::from("fatal"), LogSeverity::Error),
            (String::from("warn"), LogSeverity::Warning),
        ])
    }
}
