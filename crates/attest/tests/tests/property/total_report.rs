//! Property: the pipeline plus scorer always produce a total report.

use attest_analyzers::{AnalysisUnit, AnalyzerConfig, AnalyzerSet, Pipeline, RunArtifacts};
use attest_judge::SimulatedJudge;
use attest_trust::{score, ScoreWeights};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

fn arb_test_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z_]{3,16}", 1..12)
        .prop_map(|set| set.into_iter().map(|s| format!("tests::{}", s)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every test id gets exactly one verdict and scores stay in range,
    /// whatever the suite looks like and even with no judge reachable.
    #[test]
    fn every_test_gets_a_verdict(ids in arb_test_ids()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");

        rt.block_on(async {
            let config = AnalyzerConfig {
                judge_timeout_secs: 2,
                ..AnalyzerConfig::default()
            };
            let set = AnalyzerSet::standard(&config, Arc::new(SimulatedJudge::unreachable()))
                .expect("standard set");
            let run = RunArtifacts::from_units(
                ids.iter().map(|id| AnalysisUnit::new(id.clone())).collect(),
            );
            let population: BTreeSet<String> = ids.iter().cloned().collect();

            let findings = Pipeline::new(set, &config).run(Arc::new(run)).await;
            let report = score(&findings, &population, &ScoreWeights::default());

            for id in &ids {
                assert!(report.per_test.contains_key(id), "missing verdict for {}", id);
            }
            assert!((0.0..=1.0).contains(&report.deception_score));
            assert!((0.0..=1.0).contains(&report.trust_score));
            assert!((report.deception_score + report.trust_score - 1.0).abs() < 1e-9);
        });
    }
}
