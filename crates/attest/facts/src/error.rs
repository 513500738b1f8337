use attest_types::Seal;

/// Errors from fact extraction and seal verification.
#[derive(Debug, thiserror::Error)]
pub enum FactError {
    #[error("invalid record '{record_id}': {reason}")]
    Validation { record_id: String, reason: String },
    #[error("seal mismatch: expected {expected}, computed {computed}")]
    TamperDetected { expected: Seal, computed: Seal },
    #[error("malformed run report: {0}")]
    MalformedReport(String),
}

impl FactError {
    pub fn validation(record_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            record_id: record_id.into(),
            reason: reason.into(),
        }
    }
}
