use crate::error::FactError;
use attest_types::{Seal, TestRunFacts, VerifiedFactSheet};
use chrono::Utc;

/// Current canonical encoding version. Bump on any change to
/// [`canonical_bytes`] so old sheets stay verifiable against their own
/// recorded version.
pub const SEAL_VERSION: &str = "1.0";

/// Canonical byte encoding of run facts.
///
/// Fields are fed to the hasher in fixed order: total, passed, failed,
/// skipped (LE u64), the success rate formatted with exactly one decimal,
/// deployment flag as one byte, the failed-id list length-prefixed with
/// each id length-prefixed UTF-8, then the version string. Any consumer
/// can rebuild these bytes and recompute the digest.
pub fn canonical_bytes(facts: &TestRunFacts, version: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for count in [
        facts.total_count,
        facts.passed_count,
        facts.failed_count,
        facts.skipped_count,
    ] {
        buf.extend_from_slice(&count.to_le_bytes());
    }
    buf.extend_from_slice(format!("{:.1}", facts.success_rate_percent).as_bytes());
    buf.push(facts.deployment_allowed as u8);
    buf.extend_from_slice(&(facts.failed_test_ids.len() as u64).to_le_bytes());
    for id in &facts.failed_test_ids {
        buf.extend_from_slice(&(id.len() as u64).to_le_bytes());
        buf.extend_from_slice(id.as_bytes());
    }
    buf.extend_from_slice(version.as_bytes());
    buf
}

/// Compute the seal for facts under a given encoding version.
pub fn compute_seal(facts: &TestRunFacts, version: &str) -> Seal {
    Seal::hash(&canonical_bytes(facts, version))
}

/// Seal run facts into an immutable fact sheet.
pub fn seal(facts: TestRunFacts, version: &str) -> VerifiedFactSheet {
    let seal = compute_seal(&facts, version);
    tracing::info!(seal = %seal, total = facts.total_count, "sealed run facts");
    VerifiedFactSheet {
        facts,
        seal_version: version.to_string(),
        sealed_at: Utc::now(),
        seal,
    }
}

/// Recompute the seal from the sheet's own facts and compare.
pub fn verify(sheet: &VerifiedFactSheet) -> bool {
    compute_seal(&sheet.facts, &sheet.seal_version) == sheet.seal
}

/// Like [`verify`], but a mismatch is surfaced as [`FactError::TamperDetected`].
/// Tampering is fatal for any caller trusting the sheet; it is never
/// downgraded or auto-corrected.
pub fn ensure_intact(sheet: &VerifiedFactSheet) -> Result<(), FactError> {
    let computed = compute_seal(&sheet.facts, &sheet.seal_version);
    if computed != sheet.seal {
        return Err(FactError::TamperDetected {
            expected: sheet.seal.clone(),
            computed,
        });
    }
    Ok(())
}
