use attest_judge::JudgeError;

/// Errors an analyzer may raise. The pipeline retries transient failures
/// and degrades the rest to `unavailable` findings; these never abort a run.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("judge call failed: {0}")]
    Judge(#[from] JudgeError),
    #[error("service probe failed for {endpoint}: {reason}")]
    Probe { endpoint: String, reason: String },
    #[error("analyzer task timed out")]
    Timeout,
}

impl AnalyzerError {
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Transient errors are worth retrying; the rest fail immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Judge(JudgeError::Transport(_)) | Self::Judge(JudgeError::BadStatus { .. }) => true,
            Self::Probe { .. } | Self::Timeout => true,
            _ => false,
        }
    }
}
