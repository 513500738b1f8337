//! Trust scoring: fold a finding set into one [`TrustReport`].
//!
//! Per-test categorization: a `critical` finding wins outright; otherwise
//! the highest-confidence finding's category; no findings means `good`.
//! The deception score is a fixed weighted blend of the proportion of
//! tests carrying each deception category. The weights are policy the
//! operator may override, but [`ScoreWeights::default`] is the shipped
//! contract.

#![deny(unsafe_code)]

use attest_types::{Finding, Severity, TestCategory, TestVerdict, TrustReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weight of each deception category in the blended score.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub mock_abuse: f64,
    pub skeleton: f64,
    pub honeypot_manipulated: f64,
    pub lazy: f64,
    pub hallucinated: f64,
    pub incomplete: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            mock_abuse: 0.25,
            skeleton: 0.25,
            honeypot_manipulated: 0.20,
            lazy: 0.15,
            hallucinated: 0.10,
            incomplete: 0.05,
        }
    }
}

impl ScoreWeights {
    fn weight_for(&self, category: TestCategory) -> f64 {
        match category {
            TestCategory::MockAbuse => self.mock_abuse,
            TestCategory::Skeleton => self.skeleton,
            TestCategory::HoneypotManipulated => self.honeypot_manipulated,
            TestCategory::Lazy => self.lazy,
            TestCategory::Hallucinated => self.hallucinated,
            TestCategory::Incomplete => self.incomplete,
            _ => 0.0,
        }
    }
}

/// Aggregate findings into a total, deterministic report.
///
/// `test_ids` is the full population from the run; ids that appear only
/// in findings (run-scope, doc claims) join the population so nothing an
/// analyzer said is dropped.
pub fn score(
    findings: &[Finding],
    test_ids: &BTreeSet<String>,
    weights: &ScoreWeights,
) -> TrustReport {
    let mut by_test: BTreeMap<String, Vec<Finding>> = BTreeMap::new();
    let mut population: BTreeSet<String> = test_ids.clone();
    for finding in findings {
        population.insert(finding.test_id.clone());
        by_test
            .entry(finding.test_id.clone())
            .or_default()
            .push(finding.clone());
    }

    let mut per_test: BTreeMap<String, TestVerdict> = BTreeMap::new();
    let mut category_counts: BTreeMap<TestCategory, u64> = BTreeMap::new();
    for id in &population {
        let verdict = match by_test.get(id) {
            Some(list) => winning_verdict(list),
            None => TestVerdict {
                category: TestCategory::Good,
                severity: Severity::Low,
                confidence: 1.0,
            },
        };
        *category_counts.entry(verdict.category).or_default() += 1;
        per_test.insert(id.clone(), verdict);
    }

    let total = population.len() as f64;
    let mut deception = 0.0;
    if total > 0.0 {
        for (category, count) in &category_counts {
            let proportion = (*count as f64 / total).min(1.0);
            deception += weights.weight_for(*category) * proportion;
        }
    }
    let deception_score = deception.min(1.0);
    let trust_score = 1.0 - deception_score;
    tracing::info!(trust = trust_score, deception = deception_score, tests = population.len(), "trust report computed");

    TrustReport {
        per_test,
        findings: by_test,
        category_counts,
        deception_score,
        trust_score,
    }
}

/// Critical severity wins outright; otherwise highest confidence, with
/// severity then category as deterministic tie-breaks.
fn winning_verdict(findings: &[Finding]) -> TestVerdict {
    if let Some(critical) = findings.iter().find(|f| f.severity == Severity::Critical) {
        return TestVerdict {
            category: critical.category,
            severity: critical.severity,
            confidence: critical.confidence,
        };
    }
    let mut best: Option<&Finding> = None;
    for f in findings {
        let better = match best {
            None => true,
            Some(b) => (f.confidence, f.severity, f.category) > (b.confidence, b.severity, b.category),
        };
        if better {
            best = Some(f);
        }
    }
    match best {
        Some(f) => TestVerdict {
            category: f.category,
            severity: f.severity,
            confidence: f.confidence,
        },
        None => TestVerdict {
            category: TestCategory::Good,
            severity: Severity::Low,
            confidence: 1.0,
        },
    }
}
