use crate::analyzer::Analyzer;
use crate::claim_cross_reference::ClaimCrossReferenceAnalyzer;
use crate::config::AnalyzerConfig;
use crate::deceptive_pattern::DeceptivePatternAnalyzer;
use crate::error::AnalyzerError;
use crate::execution_timing::ExecutionTimingAnalyzer;
use crate::feature_hallucination::FeatureHallucinationAnalyzer;
use crate::honeypot_integrity::HoneypotIntegrityAnalyzer;
use crate::implementation_completeness::ImplementationCompletenessAnalyzer;
use crate::live_integration::LiveIntegrationAnalyzer;
use crate::mock_usage::MockUsageAnalyzer;
use crate::unit::RunArtifacts;
use attest_judge::Judge;
use attest_types::{Finding, RUN_SCOPE_ID};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{sleep, timeout};

/// The closed set of analyzers, registered explicitly at startup.
pub struct AnalyzerSet {
    analyzers: Vec<Arc<dyn Analyzer>>,
}

impl AnalyzerSet {
    /// All eight shipped analyzers.
    pub fn standard(config: &AnalyzerConfig, judge: Arc<dyn Judge>) -> Result<Self, AnalyzerError> {
        Ok(Self {
            analyzers: vec![
                Arc::new(MockUsageAnalyzer::new(config)?),
                Arc::new(ExecutionTimingAnalyzer::new(config)),
                Arc::new(ImplementationCompletenessAnalyzer::new(config)),
                Arc::new(HoneypotIntegrityAnalyzer::new(config)?),
                Arc::new(DeceptivePatternAnalyzer::new()?),
                Arc::new(ClaimCrossReferenceAnalyzer::new(judge)),
                Arc::new(FeatureHallucinationAnalyzer::new()?),
                Arc::new(LiveIntegrationAnalyzer::new(config)),
            ],
        })
    }

    pub fn custom(analyzers: Vec<Arc<dyn Analyzer>>) -> Self {
        Self { analyzers }
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

/// Bounded fan-out over analyzer × test pairs.
///
/// Every dispatched pair resolves to findings or to one `unavailable`
/// fallback; the output is total and deterministically ordered, so the
/// scorer downstream never sees a partial run.
pub struct Pipeline {
    set: AnalyzerSet,
    max_concurrency: usize,
    task_timeout: Duration,
    retries: u32,
}

impl Pipeline {
    pub fn new(set: AnalyzerSet, config: &AnalyzerConfig) -> Self {
        Self {
            set,
            max_concurrency: config.max_concurrency.max(1),
            task_timeout: Duration::from_secs(config.judge_timeout_secs),
            retries: config.judge_retries,
        }
    }

    pub async fn run(&self, run: Arc<RunArtifacts>) -> Vec<Finding> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks: JoinSet<Vec<Finding>> = JoinSet::new();

        for analyzer in &self.set.analyzers {
            for idx in 0..run.units.len() {
                let analyzer = Arc::clone(analyzer);
                let run = Arc::clone(&run);
                let semaphore = Arc::clone(&semaphore);
                let (task_timeout, retries) = (self.task_timeout, self.retries);
                tasks.spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => return Vec::new(),
                    };
                    let unit = &run.units[idx];
                    let outcome = attempt_with_budget(retries, task_timeout, || {
                        analyzer.analyze(unit)
                    })
                    .await;
                    match outcome {
                        Ok(findings) => findings,
                        Err(e) => {
                            tracing::warn!(
                                analyzer = analyzer.name(),
                                test_id = %unit.test_id,
                                error = %e,
                                "analyzer degraded to unavailable"
                            );
                            vec![Finding::unavailable(
                                analyzer.name(),
                                &unit.test_id,
                                e.to_string(),
                            )]
                        }
                    }
                });
            }

            // One run-level task per analyzer.
            let analyzer = Arc::clone(analyzer);
            let run = Arc::clone(&run);
            let semaphore = Arc::clone(&semaphore);
            let (task_timeout, retries) = (self.task_timeout, self.retries);
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Vec::new(),
                };
                let outcome = attempt_with_budget(retries, task_timeout, || {
                    analyzer.analyze_run(&run)
                })
                .await;
                match outcome {
                    Ok(findings) => findings,
                    Err(e) => vec![Finding::unavailable(
                        analyzer.name(),
                        RUN_SCOPE_ID,
                        e.to_string(),
                    )],
                }
            });
        }

        // Barrier: every dispatched task contributes before aggregation.
        let mut findings = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(batch) => findings.extend(batch),
                Err(e) => tracing::warn!(error = %e, "analyzer task aborted"),
            }
        }

        findings.sort_by(|a, b| {
            (a.test_id.as_str(), a.analyzer.as_str(), a.category)
                .cmp(&(b.test_id.as_str(), b.analyzer.as_str(), b.category))
        });
        tracing::info!(count = findings.len(), "analyzer pipeline complete");
        findings
    }
}

/// Run `op` under the per-attempt deadline, retrying transient failures
/// with doubling backoff until the budget runs out.
async fn attempt_with_budget<F, Fut>(
    retries: u32,
    task_timeout: Duration,
    mut op: F,
) -> Result<Vec<Finding>, AnalyzerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<Finding>, AnalyzerError>>,
{
    let mut attempt = 0u32;
    loop {
        let result = match timeout(task_timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(AnalyzerError::Timeout),
        };
        match result {
            Ok(findings) => return Ok(findings),
            Err(e) if e.is_transient() && attempt < retries => {
                attempt += 1;
                sleep(Duration::from_millis(50 * (1 << attempt))).await;
            }
            Err(e) => return Err(e),
        }
    }
}
