use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::unit::AnalysisUnit;
use async_trait::async_trait;
use attest_types::{Finding, Severity, TestCategory};
use regex::Regex;

/// Flags integration-classified tests that lean on mocking constructs.
///
/// A unit test may mock freely; an integration test that mocks its
/// collaborators is testing nothing. Severity scales with mock density,
/// the fraction of body lines referencing a mock.
pub struct MockUsageAnalyzer {
    integration_markers: Vec<String>,
    mock_patterns: Vec<Regex>,
}

impl MockUsageAnalyzer {
    pub const NAME: &'static str = "mock-usage";

    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let mock_patterns = config
            .mock_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AnalyzerError::pattern(p, e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            integration_markers: config.integration_markers.clone(),
            mock_patterns,
        })
    }

    fn mock_density(&self, body: &str) -> f64 {
        let lines: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return 0.0;
        }
        let mocked = lines
            .iter()
            .filter(|line| self.mock_patterns.iter().any(|p| p.is_match(line)))
            .count();
        mocked as f64 / lines.len() as f64
    }
}

#[async_trait]
impl Analyzer for MockUsageAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        let Some(source) = &unit.source else {
            return Ok(Vec::new());
        };
        if !unit.has_marker(&self.integration_markers) {
            return Ok(Vec::new());
        }
        let density = self.mock_density(&source.body);
        if density == 0.0 {
            return Ok(Vec::new());
        }
        let severity = if density > 0.5 {
            Severity::High
        } else if density > 0.2 {
            Severity::Medium
        } else {
            Severity::Low
        };
        Ok(vec![Finding::new(
            Self::NAME,
            &unit.test_id,
            TestCategory::MockAbuse,
            severity,
            0.5 + density / 2.0,
            format!(
                "integration test mocks {:.0}% of its body",
                density * 100.0
            ),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::TestSource;

    fn unit(id: &str, body: &str, tags: &[&str]) -> AnalysisUnit {
        AnalysisUnit::new(id).with_source(TestSource {
            test_id: id.into(),
            body: body.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            exercised_functions: vec![],
            declared_endpoints: vec![],
        })
    }

    fn analyzer() -> MockUsageAnalyzer {
        MockUsageAnalyzer::new(&AnalyzerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn integration_test_with_mocks_is_flagged() {
        let u = unit(
            "tests::integration::checkout",
            "let db = mock_database();\nlet api = MagicMock()\nassert!(checkout(&db, &api).is_ok());",
            &[],
        );
        let findings = analyzer().analyze(&u).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, TestCategory::MockAbuse);
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[tokio::test]
    async fn unit_test_with_mocks_is_fine() {
        let u = unit("tests::unit::checkout", "let db = mock_database();", &[]);
        assert!(analyzer().analyze(&u).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn integration_test_without_mocks_is_fine() {
        let u = unit(
            "tests::checkout",
            "let db = connect_real();\nassert!(checkout(&db).is_ok());",
            &["integration"],
        );
        assert!(analyzer().analyze(&u).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_source_means_no_findings() {
        let u = AnalysisUnit::new("tests::integration::x");
        assert!(analyzer().analyze(&u).await.unwrap().is_empty());
    }
}
