use std::fmt;
use std::sync::Arc;

/// Decides from a single console line whether the server finished starting.
#[derive(Clone)]
pub struct ReadinessProbe {
    predicate: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    description: String,
}

impl ReadinessProbe {
    /// Ready once one line contains every non-empty marker.
    pub fn from_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers: Vec<String> = markers
            .into_iter()
            .map(Into::into)
            .filter(|m| !m.trim().is_empty())
            .collect();
        let description = format!("line contains all of {:?}", markers);

        Self {
            predicate: Arc::new(move |line: &str| {
                !markers.is_empty() && markers.iter().all(|m| line.contains(m.as_str()))
            }),
            description,
        }
    }

    pub fn custom<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            description: description.into(),
        }
    }

    pub fn is_ready(&self, line: &str) -> bool {
        (self.predicate)(line)
    }
}

impl fmt::Debug for ReadinessProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessProbe")
            .field("description", &self.description)
            .finish()
    }
}
