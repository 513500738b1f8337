use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::unit::{AnalysisUnit, RunArtifacts};
use async_trait::async_trait;
use attest_types::{Finding, Seal, Severity, TestCategory, TestOutcome, RUN_SCOPE_ID};
use regex::Regex;
use std::collections::BTreeMap;

/// Guards honeypot tests.
///
/// A honeypot is authored to always fail; it exists to catch whoever edits
/// the suite to make everything green. One that now passes, or whose body
/// drifted from its recorded baseline, is manipulation at critical
/// severity. A suite with no honeypots at all gets a run-level finding.
pub struct HoneypotIntegrityAnalyzer {
    name_patterns: Vec<Regex>,
    baselines: BTreeMap<String, Seal>,
}

impl HoneypotIntegrityAnalyzer {
    pub const NAME: &'static str = "honeypot-integrity";

    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let name_patterns = config
            .honeypot_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AnalyzerError::pattern(p, e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name_patterns,
            baselines: config.honeypot_baselines.clone(),
        })
    }

    fn is_honeypot(&self, unit: &AnalysisUnit) -> bool {
        let id = unit.test_id.to_lowercase();
        self.name_patterns.iter().any(|p| p.is_match(&id))
            || unit
                .source
                .as_ref()
                .map(|s| s.tags.iter().any(|t| t.eq_ignore_ascii_case("honeypot")))
                .unwrap_or(false)
    }
}

#[async_trait]
impl Analyzer for HoneypotIntegrityAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        if !self.is_honeypot(unit) {
            return Ok(Vec::new());
        }
        let mut findings = Vec::new();

        if let Some(trace) = &unit.trace {
            if trace.outcome == TestOutcome::Passed {
                findings.push(Finding::new(
                    Self::NAME,
                    &unit.test_id,
                    TestCategory::HoneypotManipulated,
                    Severity::Critical,
                    1.0,
                    "honeypot test passed; it is authored to always fail",
                ));
            }
        }

        if let (Some(source), Some(baseline)) =
            (&unit.source, self.baselines.get(&unit.test_id))
        {
            let current = Seal::hash(source.body.as_bytes());
            if &current != baseline {
                findings.push(Finding::new(
                    Self::NAME,
                    &unit.test_id,
                    TestCategory::HoneypotManipulated,
                    Severity::Critical,
                    1.0,
                    format!(
                        "honeypot body drifted from baseline (expected {}, found {})",
                        baseline, current
                    ),
                ));
            }
        }

        Ok(findings)
    }

    async fn analyze_run(&self, run: &RunArtifacts) -> Result<Vec<Finding>, AnalyzerError> {
        if run.units.iter().any(|u| self.is_honeypot(u)) {
            return Ok(Vec::new());
        }
        Ok(vec![Finding::new(
            Self::NAME,
            RUN_SCOPE_ID,
            TestCategory::Incomplete,
            Severity::Medium,
            0.6,
            "suite contains no honeypot tests; tampering would go undetected",
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{ExecutionTrace, TestSource};

    fn honeypot_unit(outcome: TestOutcome, body: &str) -> AnalysisUnit {
        AnalysisUnit::new("tests::honeypot_cart_total")
            .with_source(TestSource {
                test_id: "tests::honeypot_cart_total".into(),
                body: body.into(),
                tags: vec![],
                exercised_functions: vec![],
                declared_endpoints: vec![],
            })
            .with_trace(ExecutionTrace {
                test_id: "tests::honeypot_cart_total".into(),
                outcome,
                duration_secs: 0.1,
            })
    }

    fn analyzer() -> HoneypotIntegrityAnalyzer {
        HoneypotIntegrityAnalyzer::new(&AnalyzerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn passing_honeypot_is_critical() {
        let findings = analyzer()
            .analyze(&honeypot_unit(TestOutcome::Passed, "assert_eq!(total, -1);"))
            .await
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, TestCategory::HoneypotManipulated);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].confidence, 1.0);
    }

    #[tokio::test]
    async fn failing_honeypot_is_healthy() {
        let findings = analyzer()
            .analyze(&honeypot_unit(TestOutcome::Failed, "assert_eq!(total, -1);"))
            .await
            .unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn body_drift_from_baseline_is_critical() {
        let baseline_body = "assert_eq!(total, -1);";
        let mut config = AnalyzerConfig::default();
        config.honeypot_baselines.insert(
            "tests::honeypot_cart_total".into(),
            Seal::hash(baseline_body.as_bytes()),
        );
        let analyzer = HoneypotIntegrityAnalyzer::new(&config).unwrap();

        let findings = analyzer
            .analyze(&honeypot_unit(TestOutcome::Failed, "assert!(true);"))
            .await
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, TestCategory::HoneypotManipulated);
        assert!(findings[0].evidence.contains("drifted"));
    }

    #[tokio::test]
    async fn non_honeypot_is_ignored() {
        let unit = AnalysisUnit::new("tests::cart_total");
        assert!(analyzer().analyze(&unit).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_honeypots_flagged_at_run_level() {
        let run = RunArtifacts::from_units(vec![
            AnalysisUnit::new("tests::a"),
            AnalysisUnit::new("tests::b"),
        ]);
        let findings = analyzer().analyze_run(&run).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].test_id, RUN_SCOPE_ID);
        assert_eq!(findings[0].category, TestCategory::Incomplete);
    }

    #[tokio::test]
    async fn present_honeypots_silence_run_level_finding() {
        let run = RunArtifacts::from_units(vec![
            AnalysisUnit::new("tests::a"),
            AnalysisUnit::new("tests::honeypot_x"),
        ]);
        assert!(analyzer().analyze_run(&run).await.unwrap().is_empty());
    }
}
