use crate::finding::{Finding, Severity, TestCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Winning categorization for one test.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestVerdict {
    pub category: TestCategory,
    pub severity: Severity,
    pub confidence: f64,
}

/// Run-level trust assessment.
///
/// Recomputed fresh per run from the full finding set; never partially
/// updated. `trust_score` is always `1.0 - deception_score`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrustReport {
    /// Winning verdict per test id (includes run-scope synthetic ids).
    pub per_test: BTreeMap<String, TestVerdict>,
    /// Every finding, per test, in deterministic order.
    pub findings: BTreeMap<String, Vec<Finding>>,
    pub category_counts: BTreeMap<TestCategory, u64>,
    pub deception_score: f64,
    pub trust_score: f64,
}

impl TrustReport {
    pub fn count(&self, category: TestCategory) -> u64 {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    /// Any category present that the caller considers fatal?
    pub fn has_any(&self, categories: &[TestCategory]) -> bool {
        categories.iter().any(|c| self.count(*c) > 0)
    }

    /// One-line summary for logs and CLI output.
    pub fn summary(&self) -> String {
        format!(
            "tests: {}, deceptive: {}, trust: {:.2}",
            self.per_test.len(),
            self.per_test
                .values()
                .filter(|v| v.category.is_deceptive())
                .count(),
            self.trust_score,
        )
    }

    /// Render the report's claims as prose so it can be audited against a
    /// sealed fact sheet through the same rules as any other narrative.
    pub fn narrative(&self) -> String {
        let mut lines = vec![format!(
            "Trust score is {:.2} and deception score is {:.2}.",
            self.trust_score, self.deception_score
        )];
        for (category, count) in &self.category_counts {
            if *count > 0 {
                lines.push(format!("{} test(s) categorized {}.", count, category));
            }
        }
        lines.join("\n")
    }
}
