use crate::seal::Seal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ground-truth facts about one test run.
///
/// Every field is a pure function of the input record set; no external
/// state influences them. `total_count` always equals the sum of the
/// outcome counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestRunFacts {
    pub total_count: u64,
    pub passed_count: u64,
    pub failed_count: u64,
    pub skipped_count: u64,
    /// passed/total × 100, rounded to one decimal; 0.0 for an empty run.
    pub success_rate_percent: f64,
    /// True only when nothing failed and at least one test ran.
    pub deployment_allowed: bool,
    /// Failed test ids in input order, for traceability.
    pub failed_test_ids: Vec<String>,
}

impl TestRunFacts {
    /// Exact statements a downstream reporter must repeat verbatim.
    /// Any narrative contradicting these is a misrepresentation.
    pub fn exact_statements(&self) -> Vec<String> {
        vec![
            format!("EXACTLY {} tests are failing", self.failed_count),
            format!("Success rate is EXACTLY {:.1}%", self.success_rate_percent),
            format!(
                "Deployment is {}",
                if self.deployment_allowed {
                    "ALLOWED"
                } else {
                    "BLOCKED"
                }
            ),
            "Any claim contradicting these facts is false".to_string(),
        ]
    }
}

/// A sealed, immutable fact sheet.
///
/// Created once per run and never mutated; a later recomputation of the
/// seal that disagrees with `seal` signals tampering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifiedFactSheet {
    pub facts: TestRunFacts,
    pub seal_version: String,
    pub sealed_at: DateTime<Utc>,
    pub seal: Seal,
}

impl VerifiedFactSheet {
    /// Render the wire form documented for consumers.
    pub fn to_wire(&self) -> FactSheetWire {
        FactSheetWire {
            verification: VerificationWire {
                version: self.seal_version.clone(),
                timestamp: self.sealed_at,
                hash: self.seal.clone(),
            },
            immutable_facts: ImmutableFactsWire {
                total_test_count: self.facts.total_count,
                passed_count: self.facts.passed_count,
                failed_count: self.facts.failed_count,
                skipped_count: self.facts.skipped_count,
                exact_success_rate: self.facts.success_rate_percent,
                deployment_allowed: self.facts.deployment_allowed,
            },
            failed_test_details: self
                .facts
                .failed_test_ids
                .iter()
                .map(|id| FailedTestWire {
                    name: id.clone(),
                    must_fix: true,
                })
                .collect(),
        }
    }
}

/// Consumer-facing JSON shape of a sealed fact sheet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactSheetWire {
    pub verification: VerificationWire,
    pub immutable_facts: ImmutableFactsWire,
    pub failed_test_details: Vec<FailedTestWire>,
}

impl FactSheetWire {
    /// Rebuild the internal sheet from the wire form. The wire carries
    /// every field the seal covers, so a reconstructed sheet verifies
    /// exactly when the original would.
    pub fn into_sheet(self) -> VerifiedFactSheet {
        VerifiedFactSheet {
            facts: TestRunFacts {
                total_count: self.immutable_facts.total_test_count,
                passed_count: self.immutable_facts.passed_count,
                failed_count: self.immutable_facts.failed_count,
                skipped_count: self.immutable_facts.skipped_count,
                success_rate_percent: self.immutable_facts.exact_success_rate,
                deployment_allowed: self.immutable_facts.deployment_allowed,
                failed_test_ids: self
                    .failed_test_details
                    .into_iter()
                    .map(|f| f.name)
                    .collect(),
            },
            seal_version: self.verification.version,
            sealed_at: self.verification.timestamp,
            seal: self.verification.hash,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationWire {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub hash: Seal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImmutableFactsWire {
    pub total_test_count: u64,
    pub passed_count: u64,
    pub failed_count: u64,
    pub skipped_count: u64,
    pub exact_success_rate: f64,
    pub deployment_allowed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FailedTestWire {
    pub name: String,
    pub must_fix: bool,
}
