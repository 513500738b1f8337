use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single test as reported by the external runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
    Passed,
    Failed,
    Skipped,
    Error,
}

impl TestOutcome {
    /// Errored tests block deployment the same way failures do.
    pub fn counts_as_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One test result consumed from the raw run report.
///
/// Immutable once read; the identifier is unique within a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawTestRecord {
    /// Runner-assigned identifier (e.g. `tests/api.rs::login_rejects_bad_token`).
    pub id: String,
    /// Reported outcome.
    pub outcome: TestOutcome,
    /// Wall-clock duration in seconds. Never negative in a valid record.
    pub duration_secs: f64,
}

impl RawTestRecord {
    pub fn new(id: impl Into<String>, outcome: TestOutcome, duration_secs: f64) -> Self {
        Self {
            id: id.into(),
            outcome,
            duration_secs,
        }
    }
}
