//! External judge capability.
//!
//! Some trust checks are semantic rather than structural: does a test body
//! actually exercise what its name promises? Those questions are delegated
//! to an external judge service behind the [`Judge`] trait. Analyzers never
//! talk HTTP themselves; they hold a `dyn Judge` and treat every verdict as
//! advisory evidence, never as ground truth.

#![deny(unsafe_code)]

pub mod error;

use std::time::Duration;

use async_trait::async_trait;
use attest_types::TestCategory;
use serde::{Deserialize, Serialize};

pub use error::JudgeError;

/// A single question posed to the judge about one test.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub test_id: String,
    pub question: String,
    /// Supporting material, typically the test body and related source.
    pub context: String,
}

/// The judge's answer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub category: TestCategory,
    /// Confidence in `[0.0, 1.0]` as reported by the judge.
    pub confidence: f64,
    pub rationale: String,
}

/// Trait for semantic judgment of test content.
#[async_trait]
pub trait Judge: Send + Sync {
    async fn evaluate(&self, request: &JudgeRequest) -> Result<JudgeVerdict, JudgeError>;
}

/// Judge backed by an HTTP endpoint speaking JSON.
pub struct HttpJudge {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpJudge {
    /// Default per-request timeout. Pipeline-level deadlines are enforced
    /// separately by the caller.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self, JudgeError> {
        let client = reqwest::Client::builder()
            .timeout(Self::DEFAULT_TIMEOUT)
            .no_proxy()
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }
}

#[async_trait]
impl Judge for HttpJudge {
    async fn evaluate(&self, request: &JudgeRequest) -> Result<JudgeVerdict, JudgeError> {
        let mut req = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }
        let verdict: JudgeVerdict = response
            .json()
            .await
            .map_err(|e| JudgeError::MalformedVerdict(e.to_string()))?;
        tracing::debug!(
            test_id = %request.test_id,
            category = %verdict.category,
            confidence = verdict.confidence,
            "judge verdict received"
        );
        Ok(verdict)
    }
}

/// Simulated judge for testing (no network).
pub struct SimulatedJudge {
    verdicts: Vec<(String, JudgeVerdict)>,
    default: Option<JudgeVerdict>,
    fail_transport: bool,
}

impl SimulatedJudge {
    pub fn new() -> Self {
        Self {
            verdicts: Vec::new(),
            default: None,
            fail_transport: false,
        }
    }

    /// Configure a verdict for a specific test id.
    pub fn with_verdict(
        mut self,
        test_id: impl Into<String>,
        category: TestCategory,
        confidence: f64,
        rationale: impl Into<String>,
    ) -> Self {
        self.verdicts.push((
            test_id.into(),
            JudgeVerdict {
                category,
                confidence,
                rationale: rationale.into(),
            },
        ));
        self
    }

    /// Answer every unconfigured test with this verdict.
    pub fn with_default(mut self, category: TestCategory, confidence: f64) -> Self {
        self.default = Some(JudgeVerdict {
            category,
            confidence,
            rationale: "default verdict".into(),
        });
        self
    }

    /// Every call fails at the transport layer.
    pub fn unreachable() -> Self {
        Self {
            verdicts: Vec::new(),
            default: None,
            fail_transport: true,
        }
    }

    /// All-clear preset: everything is judged Good.
    pub fn all_good() -> Self {
        Self::new().with_default(TestCategory::Good, 0.9)
    }
}

impl Default for SimulatedJudge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Judge for SimulatedJudge {
    async fn evaluate(&self, request: &JudgeRequest) -> Result<JudgeVerdict, JudgeError> {
        if self.fail_transport {
            return Err(JudgeError::Transport("simulated outage".into()));
        }
        if let Some((_, verdict)) = self.verdicts.iter().find(|(id, _)| *id == request.test_id) {
            return Ok(verdict.clone());
        }
        self.default
            .clone()
            .ok_or_else(|| JudgeError::NoVerdict(request.test_id.clone()))
    }
}
