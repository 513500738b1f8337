use crate::analyzer::Analyzer;
use crate::error::AnalyzerError;
use crate::unit::{AnalysisUnit, RunArtifacts};
use async_trait::async_trait;
use attest_types::{Finding, Severity, TestCategory};
use regex::Regex;

/// Compares README feature claims against what the codebase actually has.
///
/// Run-level only. A documented feature with neither an implementation
/// index entry nor a covering test is flagged under a synthetic
/// `doc:<slug>` id so it aggregates like any other finding.
pub struct FeatureHallucinationAnalyzer {
    claim_line: Regex,
}

impl FeatureHallucinationAnalyzer {
    pub const NAME: &'static str = "feature-hallucination";

    pub fn new() -> Result<Self, AnalyzerError> {
        let pattern = r"^\s*[-*]\s+(?:\*\*)?([A-Za-z][A-Za-z0-9 _/-]{2,60})";
        Ok(Self {
            claim_line: Regex::new(pattern).map_err(|e| AnalyzerError::pattern(pattern, e))?,
        })
    }

    fn slug(claim: &str) -> String {
        claim
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }

    fn is_supported(slug: &str, run: &RunArtifacts) -> bool {
        let tokens: Vec<&str> = slug.split('_').filter(|t| t.len() > 3).collect();
        if tokens.is_empty() {
            return true;
        }
        let in_index = run
            .implementation_index
            .iter()
            .any(|entry| tokens.iter().any(|t| entry.to_lowercase().contains(t)));
        let in_tests = run
            .units
            .iter()
            .any(|u| tokens.iter().any(|t| u.test_id.to_lowercase().contains(t)));
        in_index || in_tests
    }
}

#[async_trait]
impl Analyzer for FeatureHallucinationAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, _unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        Ok(Vec::new())
    }

    async fn analyze_run(&self, run: &RunArtifacts) -> Result<Vec<Finding>, AnalyzerError> {
        let Some(readme) = &run.readme else {
            return Ok(Vec::new());
        };
        let mut findings = Vec::new();
        for line in readme.lines() {
            let Some(captures) = self.claim_line.captures(line) else {
                continue;
            };
            let Some(claim) = captures.get(1) else {
                continue;
            };
            let slug = Self::slug(claim.as_str());
            if !Self::is_supported(&slug, run) {
                findings.push(Finding::new(
                    Self::NAME,
                    format!("doc:{}", slug),
                    TestCategory::Hallucinated,
                    Severity::Medium,
                    0.7,
                    format!("documented feature '{}' has no implementation or test", claim.as_str().trim()),
                ));
            }
        }
        Ok(findings)
    }
}
