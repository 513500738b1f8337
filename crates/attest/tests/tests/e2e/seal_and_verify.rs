//! End-to-end test: runner report -> facts -> sealed sheet -> wire form -> verification.

use attest_facts::{extract, seal_engine, RunReportWire, SEAL_VERSION};
use attest_types::FactSheetWire;

const REPORT: &str = r#"{
    "summary": {"total": 5, "passed": 5, "failed": 0, "skipped": 0},
    "tests": [
        {"nodeid": "tests::checkout", "outcome": "passed", "duration": 0.5},
        {"nodeid": "tests::refund", "outcome": "passed", "duration": 0.3},
        {"nodeid": "tests::inventory", "outcome": "passed", "duration": 0.1},
        {"nodeid": "tests::shipping", "outcome": "passed", "duration": 0.8},
        {"nodeid": "tests::billing", "outcome": "passed", "duration": 1.2}
    ]
}"#;

#[test]
fn clean_run_seals_with_expected_facts() {
    let records = RunReportWire::from_json(REPORT).unwrap().into_records().unwrap();
    let facts = extract(&records).unwrap();

    assert_eq!(facts.total_count, 5);
    assert_eq!(facts.passed_count, 5);
    assert_eq!(facts.failed_count, 0);
    assert_eq!(facts.success_rate_percent, 100.0);
    assert!(facts.deployment_allowed);

    let sheet = seal_engine::seal(facts, SEAL_VERSION);
    assert!(seal_engine::verify(&sheet));
    assert_eq!(sheet.seal.to_hex().len(), 64);
}

#[test]
fn wire_form_survives_a_consumer_roundtrip() {
    let records = RunReportWire::from_json(REPORT).unwrap().into_records().unwrap();
    let sheet = seal_engine::seal(extract(&records).unwrap(), SEAL_VERSION);

    let json = serde_json::to_string(&sheet.to_wire()).unwrap();
    let wire: FactSheetWire = serde_json::from_str(&json).unwrap();
    let rebuilt = wire.into_sheet();

    assert!(seal_engine::verify(&rebuilt));
    assert_eq!(rebuilt.seal, sheet.seal);
}

#[test]
fn tampering_with_the_wire_form_is_detected() {
    let records = RunReportWire::from_json(REPORT).unwrap().into_records().unwrap();
    let sheet = seal_engine::seal(extract(&records).unwrap(), SEAL_VERSION);

    let mut wire = sheet.to_wire();
    wire.immutable_facts.failed_count = 0;
    wire.immutable_facts.passed_count = 4;
    wire.immutable_facts.total_test_count = 4;
    let doctored = wire.into_sheet();

    assert!(!seal_engine::verify(&doctored));
    assert!(seal_engine::ensure_intact(&doctored).is_err());
}

#[test]
fn failing_report_blocks_deployment_end_to_end() {
    let report = r#"{
        "summary": {"total": 3, "passed": 2, "failed": 1, "skipped": 0},
        "tests": [
            {"nodeid": "tests::a", "outcome": "passed", "duration": 0.2},
            {"nodeid": "tests::b", "outcome": "error", "duration": 0.1},
            {"nodeid": "tests::c", "outcome": "passed", "duration": 0.4}
        ]
    }"#;
    let records = RunReportWire::from_json(report).unwrap().into_records().unwrap();
    let sheet = seal_engine::seal(extract(&records).unwrap(), SEAL_VERSION);

    assert!(!sheet.facts.deployment_allowed);
    assert_eq!(sheet.facts.failed_test_ids, vec!["tests::b"]);
    let wire = sheet.to_wire();
    assert_eq!(wire.failed_test_details.len(), 1);
    assert!(wire.failed_test_details[0].must_fix);
}
