use crate::error::FactError;
use attest_types::{RawTestRecord, TestOutcome};
use serde::{Deserialize, Serialize};

/// Raw run report as produced by the external test runner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReportWire {
    pub summary: RunSummaryWire,
    #[serde(default)]
    pub tests: Vec<TestEntryWire>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummaryWire {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestEntryWire {
    pub nodeid: String,
    pub outcome: String,
    pub duration: f64,
}

impl RunReportWire {
    pub fn from_json(json: &str) -> Result<Self, FactError> {
        serde_json::from_str(json).map_err(|e| FactError::MalformedReport(e.to_string()))
    }

    /// Convert wire entries into records. Facts are computed from the
    /// per-test entries, never from the runner's own summary; a summary
    /// that disagrees with its test list is logged, not trusted.
    pub fn into_records(self) -> Result<Vec<RawTestRecord>, FactError> {
        let mut records = Vec::with_capacity(self.tests.len());
        for entry in self.tests {
            let outcome = parse_outcome(&entry.outcome)
                .ok_or_else(|| FactError::validation(&entry.nodeid, format!("unknown outcome '{}'", entry.outcome)))?;
            records.push(RawTestRecord::new(entry.nodeid, outcome, entry.duration));
        }
        if self.summary.total as usize != records.len() {
            tracing::warn!(
                summary_total = self.summary.total,
                listed = records.len(),
                "run report summary disagrees with its test list"
            );
        }
        Ok(records)
    }
}

fn parse_outcome(s: &str) -> Option<TestOutcome> {
    match s {
        "passed" | "pass" => Some(TestOutcome::Passed),
        "failed" | "fail" => Some(TestOutcome::Failed),
        "skipped" | "skip" => Some(TestOutcome::Skipped),
        "error" => Some(TestOutcome::Error),
        _ => None,
    }
}
