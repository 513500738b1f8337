//! End-to-end test: sealed facts against honest and dishonest narratives.

use attest_audit::{AuditConfig, AuditOutcome, ClaimAuditor};
use attest_facts::{extract, seal_engine, SEAL_VERSION};
use attest_types::{ContradictionKind, RawTestRecord, TestOutcome, VerifiedFactSheet};

fn sealed_run(passed: usize, failed: usize) -> VerifiedFactSheet {
    let mut records = Vec::new();
    for i in 0..passed {
        records.push(RawTestRecord::new(
            format!("tests::ok_{}", i),
            TestOutcome::Passed,
            0.3,
        ));
    }
    for i in 0..failed {
        records.push(RawTestRecord::new(
            format!("tests::bad_{}", i),
            TestOutcome::Failed,
            0.2,
        ));
    }
    seal_engine::seal(extract(&records).unwrap(), SEAL_VERSION)
}

fn auditor() -> ClaimAuditor {
    ClaimAuditor::new(AuditConfig::default()).unwrap()
}

#[test]
fn rounded_rate_caught_against_sealed_92() {
    // 23 of 25 passing seals at exactly 92.0%.
    let sheet = sealed_run(23, 2);
    assert_eq!(sheet.facts.success_rate_percent, 92.0);

    let narrative = format!(
        "Great progress: approximately 95% of the suite passes. Seal: {}",
        sheet.seal.to_hex()
    );
    let report = auditor().audit(&narrative, &sheet);
    assert_eq!(report.outcome, AuditOutcome::Contradicted);
    let c = report
        .contradictions
        .iter()
        .find(|c| c.kind == ContradictionKind::RoundedSuccessRate)
        .unwrap();
    assert_eq!(c.claimed_value, "~95%");
    assert_eq!(c.actual_value, "92.0%");
}

#[test]
fn fully_honest_summary_verifies() {
    let sheet = sealed_run(23, 2);
    let narrative = format!(
        "Success rate is EXACTLY 92.0%. EXACTLY 2 tests are failing. \
         Deployment is BLOCKED. Seal: {}",
        sheet.seal.to_hex()
    );
    let report = auditor().audit(&narrative, &sheet);
    assert_eq!(report.outcome, AuditOutcome::AllClaimsVerified);
    assert!(report.contradictions.is_empty());
}

#[test]
fn exact_statement_block_passes_its_own_audit() {
    // The sheet's briefing statements must never contradict the sheet.
    let sheet = sealed_run(23, 2);
    let mut narrative = sheet.facts.exact_statements().join("\n");
    narrative.push_str(&format!("\nSeal: {}", sheet.seal.to_hex()));
    let report = auditor().audit(&narrative, &sheet);
    assert_eq!(report.outcome, AuditOutcome::AllClaimsVerified);
}

#[test]
fn false_deployment_approval_on_red_run() {
    let sheet = sealed_run(20, 5);
    let narrative = format!(
        "A few minor failures, but we are ready to deploy. Seal: {}",
        sheet.seal.to_hex()
    );
    let report = auditor().audit(&narrative, &sheet);
    let kinds: Vec<_> = report.contradictions.iter().map(|c| c.kind).collect();
    assert!(kinds.contains(&ContradictionKind::FalseDeploymentApproval));
    assert!(kinds.contains(&ContradictionKind::MinimizedFailureCount));
}

#[test]
fn narrative_must_carry_the_seal_digest() {
    let sheet = sealed_run(25, 0);
    let report = auditor().audit("Success rate is 100.0%.", &sheet);
    assert_eq!(report.outcome, AuditOutcome::Contradicted);
    assert!(report
        .contradictions
        .iter()
        .any(|c| c.kind == ContradictionKind::MissingSealReference));
}

#[test]
fn tampered_sheet_fails_before_any_audit() {
    let mut sheet = sealed_run(23, 2);
    sheet.facts.deployment_allowed = true;
    assert!(seal_engine::ensure_intact(&sheet).is_err());
}
