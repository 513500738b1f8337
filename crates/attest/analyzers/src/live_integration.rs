use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::unit::AnalysisUnit;
use async_trait::async_trait;
use attest_types::{Finding, Severity, TestCategory, TestOutcome};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Probes the service boundaries a test claims to integrate against.
///
/// A prior green result is not trusted blindly: if the declared endpoint
/// is not reachable now, the pass says nothing about the integration.
pub struct LiveIntegrationAnalyzer {
    probe_timeout: Duration,
}

impl LiveIntegrationAnalyzer {
    pub const NAME: &'static str = "live-integration";

    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
        }
    }

    async fn probe(&self, endpoint: &str) -> Result<(), String> {
        match timeout(self.probe_timeout, TcpStream::connect(endpoint)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("no response within {:?}", self.probe_timeout)),
        }
    }
}

#[async_trait]
impl Analyzer for LiveIntegrationAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> Result<Vec<Finding>, AnalyzerError> {
        let Some(source) = &unit.source else {
            return Ok(Vec::new());
        };
        let mut findings = Vec::new();
        for endpoint in &source.declared_endpoints {
            if let Err(reason) = self.probe(endpoint).await {
                tracing::debug!(test_id = %unit.test_id, endpoint = %endpoint, %reason, "probe failed");
                let passed_before = unit
                    .trace
                    .as_ref()
                    .map(|t| t.outcome == TestOutcome::Passed)
                    .unwrap_or(false);
                let category = if passed_before {
                    TestCategory::Flaky
                } else {
                    TestCategory::Incomplete
                };
                findings.push(Finding::new(
                    Self::NAME,
                    &unit.test_id,
                    category,
                    Severity::Medium,
                    0.8,
                    format!("declared endpoint {} unreachable: {}", endpoint, reason),
                ));
            }
        }
        Ok(findings)
    }
}
