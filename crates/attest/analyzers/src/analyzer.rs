use crate::error::AnalyzerError;
use crate::unit::{AnalysisUnit, RunArtifacts};
use async_trait::async_trait;
use attest_types::Finding;

/// One trust check over test artifacts.
///
/// Analyzers are independent and order-insensitive. "Nothing found" is an
/// empty vector, never an error; errors are reserved for the analyzer being
/// unable to run at all, and the pipeline turns those into `unavailable`
/// findings after its retry budget.
#[async_trait]
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Inspect one test.
    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError>;

    /// Inspect run-wide artifacts. Most analyzers have nothing to say here.
    async fn analyze_run(&self, _run: &RunArtifacts) -> Result<Vec<Finding>, AnalyzerError> {
        Ok(Vec::new())
    }
}
