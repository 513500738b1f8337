//! End-to-end test: analyzer fan-out over a full run -> trust scoring.

use attest_analyzers::{
    AnalysisUnit, AnalyzerConfig, AnalyzerSet, ExecutionTrace, Pipeline, RunArtifacts, TestSource,
};
use attest_judge::SimulatedJudge;
use attest_trust::{score, ScoreWeights};
use attest_types::{Severity, TestCategory, TestOutcome, RUN_SCOPE_ID};
use std::collections::BTreeSet;
use std::sync::Arc;

fn unit(id: &str, duration: f64, body: &str) -> AnalysisUnit {
    AnalysisUnit::new(id)
        .with_source(TestSource {
            test_id: id.into(),
            body: body.into(),
            tags: vec![],
            exercised_functions: vec![],
            declared_endpoints: vec![],
        })
        .with_trace(ExecutionTrace {
            test_id: id.into(),
            outcome: TestOutcome::Passed,
            duration_secs: duration,
        })
}

fn ids(run: &RunArtifacts) -> BTreeSet<String> {
    run.units.iter().map(|u| u.test_id.clone()).collect()
}

async fn run_standard(run: RunArtifacts) -> Vec<attest_types::Finding> {
    let config = AnalyzerConfig::default();
    let judge = Arc::new(SimulatedJudge::all_good());
    let set = AnalyzerSet::standard(&config, judge).unwrap();
    Pipeline::new(set, &config).run(Arc::new(run)).await
}

#[tokio::test]
async fn green_run_with_one_instant_empty_test_still_gets_flagged() {
    // Five passing tests; run-level facts would show 100%, yet the
    // instant, assertion-free one must surface as lazy.
    let honest = "let r = submit(&order);\nassert!(r.is_ok());\nassert_eq!(order.state(), State::Submitted);";
    let run = RunArtifacts::from_units(vec![
        unit("tests::checkout_order", 0.5, honest),
        unit("tests::refund_order", 0.3, honest),
        unit("tests::inventory_sync", 0.001, "// nothing here\n"),
        unit("tests::shipping_quote", 0.8, honest),
        unit("tests::billing_cycle", 1.2, honest),
    ]);
    let test_ids = ids(&run);
    let findings = run_standard(run).await;
    let report = score(&findings, &test_ids, &ScoreWeights::default());

    let verdict = &report.per_test["tests::inventory_sync"];
    assert_eq!(verdict.category, TestCategory::Lazy);
    assert!(report.per_test["tests::checkout_order"].category == TestCategory::Good);
    assert!(report.trust_score < 1.0);
}

#[tokio::test]
async fn passing_honeypot_dominates_every_other_signal() {
    let run = RunArtifacts::from_units(vec![
        unit(
            "tests::honeypot_negative_balance",
            0.001,
            "assert!(true);",
        ),
        unit(
            "tests::transfer_funds",
            0.4,
            "let r = transfer(&a, &b, 10);\nassert!(r.is_ok());\nassert_eq!(b.balance(), 10);",
        ),
    ]);
    let test_ids = ids(&run);
    let findings = run_standard(run).await;
    let report = score(&findings, &test_ids, &ScoreWeights::default());

    // Timing and deceptive-pattern findings also exist for the honeypot,
    // but the critical one wins outright.
    let verdict = &report.per_test["tests::honeypot_negative_balance"];
    assert_eq!(verdict.category, TestCategory::HoneypotManipulated);
    assert_eq!(verdict.severity, Severity::Critical);
    assert!(report.has_any(&[TestCategory::HoneypotManipulated]));
}

#[tokio::test]
async fn suite_without_honeypots_carries_a_run_level_verdict() {
    let honest = "let r = act();\nassert!(r.is_ok());\nassert_eq!(r.unwrap(), expected);";
    let run = RunArtifacts::from_units(vec![unit("tests::only_regular", 0.4, honest)]);
    let test_ids = ids(&run);
    let findings = run_standard(run).await;
    let report = score(&findings, &test_ids, &ScoreWeights::default());

    assert_eq!(
        report.per_test[RUN_SCOPE_ID].category,
        TestCategory::Incomplete
    );
}

#[tokio::test]
async fn unreachable_judge_degrades_without_aborting_the_run() {
    // A test whose assertions never mention its name forces a judge call.
    let config = AnalyzerConfig {
        judge_timeout_secs: 2,
        ..AnalyzerConfig::default()
    };
    let set = AnalyzerSet::standard(&config, Arc::new(SimulatedJudge::unreachable())).unwrap();
    let run = RunArtifacts::from_units(vec![unit(
        "tests::refund_order",
        0.4,
        "let c = cart();\nassert_eq!(c.len(), 3);\nassert!(c.total() > 0);",
    )]);
    let test_ids = ids(&run);
    let findings = Pipeline::new(set, &config).run(Arc::new(run)).await;
    let report = score(&findings, &test_ids, &ScoreWeights::default());

    assert_eq!(
        report.per_test["tests::refund_order"].category,
        TestCategory::Unavailable
    );
    // Unavailable is absence of signal, not deception.
    assert!(!report.per_test["tests::refund_order"].category.is_deceptive());
}

#[tokio::test]
async fn documented_but_absent_feature_joins_the_report() {
    let honest = "let r = checkout();\nassert!(r.is_ok());\nassert_eq!(r.unwrap().total, 10);";
    let mut run = RunArtifacts::from_units(vec![unit("tests::checkout_flow", 0.4, honest)]);
    run.readme = Some("- Cart checkout\n- Multi-region failover support\n".into());
    run.implementation_index = vec!["cart_checkout".into()];

    let test_ids = ids(&run);
    let findings = run_standard(run).await;
    let report = score(&findings, &test_ids, &ScoreWeights::default());

    let doc_verdicts: Vec<_> = report
        .per_test
        .keys()
        .filter(|k| k.starts_with("doc:"))
        .collect();
    assert_eq!(doc_verdicts.len(), 1);
    assert!(doc_verdicts[0].contains("failover"));
}
