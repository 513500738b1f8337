use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic id used by run-level findings that are not tied to one test
/// (e.g. "the suite contains no honeypot tests").
pub const RUN_SCOPE_ID: &str = "<suite>";

/// Trust category assigned to a test by an analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCategory {
    Good,
    Lazy,
    Incomplete,
    Hallucinated,
    Flaky,
    MockAbuse,
    Skeleton,
    HoneypotManipulated,
    Unavailable,
}

impl TestCategory {
    /// Categories that indicate deception (as opposed to absence of signal).
    pub fn is_deceptive(&self) -> bool {
        !matches!(self, Self::Good | Self::Unavailable | Self::Flaky)
    }

    pub const ALL: [TestCategory; 9] = [
        Self::Good,
        Self::Lazy,
        Self::Incomplete,
        Self::Hallucinated,
        Self::Flaky,
        Self::MockAbuse,
        Self::Skeleton,
        Self::HoneypotManipulated,
        Self::Unavailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Lazy => "lazy",
            Self::Incomplete => "incomplete",
            Self::Hallucinated => "hallucinated",
            Self::Flaky => "flaky",
            Self::MockAbuse => "mock_abuse",
            Self::Skeleton => "skeleton",
            Self::HoneypotManipulated => "honeypot_manipulated",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a finding. Ordered: `Critical` outranks everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// One observation emitted by an analyzer about one test.
///
/// Owned by the analyzer that created it; the Trust Scorer consumes
/// findings read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Finding {
    pub analyzer: String,
    pub test_id: String,
    pub category: TestCategory,
    pub severity: Severity,
    /// 0.0–1.0; clamped on construction.
    pub confidence: f64,
    pub evidence: String,
}

impl Finding {
    pub fn new(
        analyzer: impl Into<String>,
        test_id: impl Into<String>,
        category: TestCategory,
        severity: Severity,
        confidence: f64,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            analyzer: analyzer.into(),
            test_id: test_id.into(),
            category,
            severity,
            confidence: confidence.clamp(0.0, 1.0),
            evidence: evidence.into(),
        }
    }

    /// Fallback finding substituted when an analyzer cannot run for a test.
    pub fn unavailable(analyzer: impl Into<String>, test_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            analyzer,
            test_id,
            TestCategory::Unavailable,
            Severity::Low,
            1.0,
            reason,
        )
    }
}
