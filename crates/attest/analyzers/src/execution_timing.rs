use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::unit::AnalysisUnit;
use async_trait::async_trait;
use attest_types::{Finding, Severity, TestCategory, TestOutcome};

/// Flags suspicious instant-passes.
///
/// A passing test that finished in under the threshold almost certainly
/// exercised nothing. Tests explicitly tagged `trivial` are exempt.
pub struct ExecutionTimingAnalyzer {
    instant_threshold_secs: f64,
}

impl ExecutionTimingAnalyzer {
    pub const NAME: &'static str = "execution-timing";
    const TRIVIAL_TAG: &'static str = "trivial";

    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            instant_threshold_secs: config.instant_threshold_secs,
        }
    }
}

#[async_trait]
impl Analyzer for ExecutionTimingAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        let Some(trace) = &unit.trace else {
            return Ok(Vec::new());
        };
        if trace.outcome != TestOutcome::Passed {
            return Ok(Vec::new());
        }
        if trace.duration_secs >= self.instant_threshold_secs {
            return Ok(Vec::new());
        }
        if unit.has_marker(&[Self::TRIVIAL_TAG.to_string()]) {
            return Ok(Vec::new());
        }
        Ok(vec![Finding::new(
            Self::NAME,
            &unit.test_id,
            TestCategory::Lazy,
            Severity::Medium,
            0.75,
            format!(
                "passed in {:.4}s, below the {:.3}s instant-pass threshold",
                trace.duration_secs, self.instant_threshold_secs
            ),
        )])
    }
}
