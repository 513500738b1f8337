use attest_types::{RawTestRecord, TestOutcome};
use serde::{Deserialize, Serialize};

/// Source code of one function a test exercises.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionSource {
    pub name: String,
    pub body: String,
}

/// Source-level view of a single test.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestSource {
    pub test_id: String,
    pub body: String,
    /// Markers attached by the runner or collected from attributes
    /// (`integration`, `trivial`, ...).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Functions under test, resolved by the caller's indexing step.
    #[serde(default)]
    pub exercised_functions: Vec<FunctionSource>,
    /// `host:port` endpoints this test claims to integrate against.
    #[serde(default)]
    pub declared_endpoints: Vec<String>,
}

/// Execution metadata of a single test.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub test_id: String,
    pub outcome: TestOutcome,
    pub duration_secs: f64,
}

impl ExecutionTrace {
    pub fn from_record(record: &RawTestRecord) -> Self {
        Self {
            test_id: record.id.clone(),
            outcome: record.outcome,
            duration_secs: record.duration_secs,
        }
    }
}

/// Everything an analyzer may inspect about one test. Source or trace may
/// be absent; analyzers that need the missing half return no findings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisUnit {
    pub test_id: String,
    pub source: Option<TestSource>,
    pub trace: Option<ExecutionTrace>,
}

impl AnalysisUnit {
    pub fn new(test_id: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            source: None,
            trace: None,
        }
    }

    pub fn with_source(mut self, source: TestSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_trace(mut self, trace: ExecutionTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// True when any tag or id segment matches one of the markers.
    pub fn has_marker(&self, markers: &[String]) -> bool {
        let id = self.test_id.to_lowercase();
        markers.iter().any(|m| {
            id.contains(m.as_str())
                || self
                    .source
                    .as_ref()
                    .map(|s| s.tags.iter().any(|t| t.eq_ignore_ascii_case(m)))
                    .unwrap_or(false)
        })
    }
}

/// One run's worth of analyzer input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunArtifacts {
    pub units: Vec<AnalysisUnit>,
    /// Accompanying documentation (README text), if available.
    pub readme: Option<String>,
    /// Names of features/functions the codebase actually implements.
    #[serde(default)]
    pub implementation_index: Vec<String>,
}

impl RunArtifacts {
    pub fn from_units(units: Vec<AnalysisUnit>) -> Self {
        Self {
            units,
            readme: None,
            implementation_index: Vec::new(),
        }
    }
}
