use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::patterns::{has_not_implemented_marker, substantive_statement_count};
use crate::unit::{AnalysisUnit, FunctionSource};
use async_trait::async_trait;
use attest_types::{Finding, Severity, TestCategory};

/// Flags tests whose exercised functions are skeletons.
///
/// A green test over an unimplemented function proves only that the
/// skeleton does not crash. Confidence is the skeleton fraction among
/// the functions the test exercises.
pub struct ImplementationCompletenessAnalyzer {
    min_substantive_statements: usize,
}

impl ImplementationCompletenessAnalyzer {
    pub const NAME: &'static str = "implementation-completeness";

    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            min_substantive_statements: config.min_substantive_statements,
        }
    }

    fn is_skeleton(&self, function: &FunctionSource) -> bool {
        has_not_implemented_marker(&function.body)
            || substantive_statement_count(&function.body) < self.min_substantive_statements
    }
}

#[async_trait]
impl Analyzer for ImplementationCompletenessAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        let Some(source) = &unit.source else {
            return Ok(Vec::new());
        };
        if source.exercised_functions.is_empty() {
            return Ok(Vec::new());
        }
        let skeletons: Vec<&str> = source
            .exercised_functions
            .iter()
            .filter(|f| self.is_skeleton(f))
            .map(|f| f.name.as_str())
            .collect();
        if skeletons.is_empty() {
            return Ok(Vec::new());
        }
        let fraction = skeletons.len() as f64 / source.exercised_functions.len() as f64;
        let severity = if fraction >= 0.5 {
            Severity::High
        } else {
            Severity::Medium
        };
        Ok(vec![Finding::new(
            Self::NAME,
            &unit.test_id,
            TestCategory::Skeleton,
            severity,
            fraction,
            format!("skeleton functions under test: {}", skeletons.join(", ")),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::TestSource;

    fn unit_with_functions(functions: Vec<FunctionSource>) -> AnalysisUnit {
        AnalysisUnit::new("tests::billing").with_source(TestSource {
            test_id: "tests::billing".into(),
            body: "assert!(invoice(&cart).is_ok());".into(),
            tags: vec![],
            exercised_functions: functions,
            declared_endpoints: vec![],
        })
    }

    fn func(name: &str, body: &str) -> FunctionSource {
        FunctionSource {
            name: name.into(),
            body: body.into(),
        }
    }

    fn analyzer() -> ImplementationCompletenessAnalyzer {
        ImplementationCompletenessAnalyzer::new(&AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn todo_body_is_skeleton() {
        let u = unit_with_functions(vec![func("invoice", "todo!(\"billing\")")]);
        let findings = analyzer().analyze(&u).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, TestCategory::Skeleton);
        assert_eq!(findings[0].confidence, 1.0);
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[tokio::test]
    async fn confidence_tracks_skeleton_fraction() {
        let real = "let total = cart.sum();\nlet tax = total * rate;\nledger.post(total + tax);\nOk(receipt)";
        let u = unit_with_functions(vec![
            func("invoice", "pass"),
            func("sum", real),
            func("post", real),
            func("receipt", real),
        ]);
        let findings = analyzer().analyze(&u).await.unwrap();
        assert_eq!(findings[0].confidence, 0.25);
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[tokio::test]
    async fn short_body_below_minimum_is_skeleton() {
        let u = unit_with_functions(vec![func("invoice", "return 0;")]);
        let findings = analyzer().analyze(&u).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].evidence.contains("invoice"));
    }

    #[tokio::test]
    async fn substantive_functions_pass() {
        let body = "let a = load();\nlet b = transform(a);\nstore(b);";
        let u = unit_with_functions(vec![func("pipeline", body)]);
        assert!(analyzer().analyze(&u).await.unwrap().is_empty());
    }
}
