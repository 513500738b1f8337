use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of misrepresentation detected by the Claim Auditor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    RoundedSuccessRate,
    MinimizedFailureCount,
    FalseDeploymentApproval,
    MissingSealReference,
    UnsupportedClaim,
}

impl fmt::Display for ContradictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RoundedSuccessRate => "rounded_success_rate",
            Self::MinimizedFailureCount => "minimized_failure_count",
            Self::FalseDeploymentApproval => "false_deployment_approval",
            Self::MissingSealReference => "missing_seal_reference",
            Self::UnsupportedClaim => "unsupported_claim",
        };
        write!(f, "{}", s)
    }
}

/// A narrative statement that disagrees with the sealed facts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contradiction {
    /// Substring of the narrative that carried the claim.
    pub claim_text: String,
    pub claimed_value: String,
    /// Value taken from the `VerifiedFactSheet`.
    pub actual_value: String,
    pub kind: ContradictionKind,
}

impl Contradiction {
    pub fn new(
        kind: ContradictionKind,
        claim_text: impl Into<String>,
        claimed_value: impl Into<String>,
        actual_value: impl Into<String>,
    ) -> Self {
        Self {
            claim_text: claim_text.into(),
            claimed_value: claimed_value.into(),
            actual_value: actual_value.into(),
            kind,
        }
    }
}
