use crate::analyzer::Analyzer;
use crate::error::AnalyzerError;
use crate::patterns::{is_empty_body, PatternLibrary};
use crate::unit::AnalysisUnit;
use async_trait::async_trait;
use attest_types::{Finding, Severity, TestCategory};

/// Scans test bodies against the deceptive-pattern library.
pub struct DeceptivePatternAnalyzer {
    library: PatternLibrary,
}

impl DeceptivePatternAnalyzer {
    pub const NAME: &'static str = "deceptive-pattern";

    pub fn new() -> Result<Self, AnalyzerError> {
        Ok(Self {
            library: PatternLibrary::new()?,
        })
    }
}

#[async_trait]
impl Analyzer for DeceptivePatternAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        let Some(source) = &unit.source else {
            return Ok(Vec::new());
        };
        let body = &source.body;
        let mut findings = Vec::new();

        if is_empty_body(body) {
            findings.push(Finding::new(
                Self::NAME,
                &unit.test_id,
                TestCategory::Lazy,
                Severity::High,
                0.9,
                "test body contains no substantive statements",
            ));
            return Ok(findings);
        }
        if self.library.has_always_true_assertion(body) {
            findings.push(Finding::new(
                Self::NAME,
                &unit.test_id,
                TestCategory::Lazy,
                Severity::High,
                0.85,
                "assertion can never fail",
            ));
        }
        if self.library.has_tautological_comparison(body) {
            findings.push(Finding::new(
                Self::NAME,
                &unit.test_id,
                TestCategory::Lazy,
                Severity::Medium,
                0.7,
                "comparison of a value with itself",
            ));
        }
        if self.library.has_unconditional_skip(body) {
            findings.push(Finding::new(
                Self::NAME,
                &unit.test_id,
                TestCategory::Incomplete,
                Severity::Medium,
                0.8,
                "unconditional skip marker",
            ));
        }
        if self.library.swallows_failures(body) {
            findings.push(Finding::new(
                Self::NAME,
                &unit.test_id,
                TestCategory::Incomplete,
                Severity::Medium,
                0.6,
                "failure path is silently absorbed",
            ));
        }
        Ok(findings)
    }
}
