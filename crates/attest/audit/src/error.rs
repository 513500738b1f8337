/// Errors from auditor construction. Auditing itself is infallible:
/// unextractable claims are simply not verifiable.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("invalid audit pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
