use serde::{Deserialize, Serialize};

/// Keyword lists driving the auditor's heuristics.
///
/// These are configuration, not an exhaustive taxonomy: false negatives
/// are expected and acceptable, false positives are not.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Hedging words in front of a number ("approximately 95%").
    pub vague_qualifiers: Vec<String>,
    /// Language that plays down failures ("a few minor issues").
    pub minimizing_terms: Vec<String>,
    /// Deployment-recommendation phrases.
    pub deployment_phrases: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            vague_qualifiers: vec![
                "approximately".into(),
                "about".into(),
                "around".into(),
                "roughly".into(),
                "~".into(),
                "nearly".into(),
            ],
            minimizing_terms: vec![
                "a few".into(),
                "minor".into(),
                "a couple".into(),
                "small number".into(),
                "only".into(),
                "just".into(),
            ],
            deployment_phrases: vec![
                "ready to deploy".into(),
                "ready for deployment".into(),
                "safe to ship".into(),
                "ready for production".into(),
                "good to go".into(),
                "cleared for release".into(),
            ],
        }
    }
}
