use crate::analyzer::Analyzer;
use crate::error::AnalyzerError;
use crate::unit::AnalysisUnit;
use async_trait::async_trait;
use attest_judge::{Judge, JudgeRequest};
use attest_types::{Finding, Severity, TestCategory};
use std::sync::Arc;

/// Cross-checks a test's declared intent against what it asserts.
///
/// The cheap structural check runs first: a test named after a behavior
/// whose assertions mention that behavior is accepted locally. Only the
/// ambiguous remainder is sent to the external judge, and its verdict is
/// evidence, not ground truth.
pub struct ClaimCrossReferenceAnalyzer {
    judge: Arc<dyn Judge>,
}

impl ClaimCrossReferenceAnalyzer {
    pub const NAME: &'static str = "claim-cross-reference";

    /// Words carrying no intent on their own.
    const STOPWORDS: [&'static str; 8] =
        ["test", "tests", "should", "when", "with", "that", "check", "it"];

    pub fn new(judge: Arc<dyn Judge>) -> Self {
        Self { judge }
    }

    /// Intent tokens from the last path segment of the test id.
    fn intent_tokens(test_id: &str) -> Vec<String> {
        let leaf = test_id.rsplit("::").next().unwrap_or(test_id);
        leaf.split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
            .filter(|t| t.len() > 2 && !Self::STOPWORDS.contains(&t.as_str()))
            .collect()
    }

    fn assertions_mention(body: &str, tokens: &[String]) -> bool {
        let lowered = body.to_lowercase();
        lowered
            .lines()
            .filter(|line| line.contains("assert") || line.contains("expect"))
            .any(|line| tokens.iter().any(|t| line.contains(t.as_str())))
    }
}

#[async_trait]
impl Analyzer for ClaimCrossReferenceAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        let Some(source) = &unit.source else {
            return Ok(Vec::new());
        };
        let tokens = Self::intent_tokens(&unit.test_id);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        if Self::assertions_mention(&source.body, &tokens) {
            return Ok(Vec::new());
        }

        let request = JudgeRequest {
            test_id: unit.test_id.clone(),
            question: format!(
                "The test is named around [{}] but none of its assertions mention those terms. \
                 Does the body actually verify the named behavior?",
                tokens.join(", ")
            ),
            context: source.body.clone(),
        };
        let verdict = self.judge.evaluate(&request).await?;
        tracing::debug!(test_id = %unit.test_id, category = %verdict.category, "cross-reference verdict");

        if verdict.category == TestCategory::Hallucinated && verdict.confidence >= 0.5 {
            return Ok(vec![Finding::new(
                Self::NAME,
                &unit.test_id,
                TestCategory::Hallucinated,
                Severity::High,
                verdict.confidence,
                verdict.rationale,
            )]);
        }
        Ok(Vec::new())
    }
}
