use attest_types::Seal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heuristic knobs for the analyzer set.
///
/// Every list here is configuration, not an exhaustive taxonomy; operators
/// may extend them from a JSON file. Defaults match the shipped policy.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Durations below this (seconds) are suspicious instant-passes.
    pub instant_threshold_secs: f64,
    /// Minimum substantive statements before a function body counts as real.
    pub min_substantive_statements: usize,
    /// Tag or id substrings that classify a test as integration-level.
    pub integration_markers: Vec<String>,
    /// Regex sources matching mocking/patching constructs.
    pub mock_patterns: Vec<String>,
    /// Regex sources matching honeypot test names.
    pub honeypot_patterns: Vec<String>,
    /// Known-bad baseline body hashes, keyed by honeypot test id.
    pub honeypot_baselines: BTreeMap<String, Seal>,
    /// Per-attempt deadline for a judge call (seconds).
    pub judge_timeout_secs: u64,
    /// Retries after the first failed attempt.
    pub judge_retries: u32,
    /// Deadline for one live service probe (seconds).
    pub probe_timeout_secs: u64,
    /// Concurrent analyzer tasks in flight.
    pub max_concurrency: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            instant_threshold_secs: 0.01,
            min_substantive_statements: 3,
            integration_markers: vec![
                "integration".into(),
                "e2e".into(),
                "end_to_end".into(),
                "system".into(),
                "functional".into(),
            ],
            mock_patterns: vec![
                r"\bmock\w*\s*[(:.]".into(),
                r"\bMagicMock\b".into(),
                r"\bpatch\s*\(".into(),
                r"\bmonkeypatch\b".into(),
                r"\bstub\w*\s*\(".into(),
                r"\bwhen\s*\(.*\)\s*\.then".into(),
                r"\bfaux::|\bmockall\b|\bmockito\b".into(),
            ],
            honeypot_patterns: vec![
                r"honeypot".into(),
                r"should_fail".into(),
                r"expected_failure".into(),
                r"deliberate_fail".into(),
            ],
            honeypot_baselines: BTreeMap::new(),
            judge_timeout_secs: 10,
            judge_retries: 2,
            probe_timeout_secs: 5,
            max_concurrency: 8,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
