use crate::error::FactError;
use attest_types::{RawTestRecord, TestOutcome, TestRunFacts};
use std::collections::HashSet;

/// Normalize a raw record sequence into canonical run facts.
///
/// Pure and deterministic: counts are order-independent, while
/// `failed_test_ids` preserves input order. Fails fast on a negative
/// duration or a duplicate identifier; malformed input is never repaired.
pub fn extract(records: &[RawTestRecord]) -> Result<TestRunFacts, FactError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut passed = 0u64;
    let mut failed = 0u64;
    let mut skipped = 0u64;
    let mut failed_test_ids = Vec::new();

    for record in records {
        if record.duration_secs < 0.0 {
            return Err(FactError::validation(
                &record.id,
                format!("negative duration {}", record.duration_secs),
            ));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(FactError::validation(&record.id, "duplicate identifier"));
        }

        match record.outcome {
            TestOutcome::Passed => passed += 1,
            TestOutcome::Skipped => skipped += 1,
            TestOutcome::Failed | TestOutcome::Error => {
                failed += 1;
                failed_test_ids.push(record.id.clone());
            }
        }
    }

    let total = passed + failed + skipped;
    Ok(TestRunFacts {
        total_count: total,
        passed_count: passed,
        failed_count: failed,
        skipped_count: skipped,
        success_rate_percent: success_rate(passed, total),
        deployment_allowed: failed == 0 && total > 0,
        failed_test_ids,
    })
}

/// passed/total × 100, rounded to one decimal. 0.0 for an empty run.
fn success_rate(passed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = passed as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
