use crate::config::AuditConfig;
use crate::error::AuditError;
use attest_types::{Contradiction, ContradictionKind, TrustReport, VerifiedFactSheet};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Outcome of an audit. An empty contradiction list is never ambiguous:
/// "nothing was checkable" and "everything checked out" are distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    NoVerifiableClaims,
    AllClaimsVerified,
    Contradicted,
}

/// Full result of auditing one narrative against one sealed sheet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditReport {
    pub outcome: AuditOutcome,
    pub contradictions: Vec<Contradiction>,
}

/// Checks a narrative's claims against a sealed fact sheet.
///
/// The auditor never approves silently: every numeric or deployment claim
/// it can extract is compared against the sheet with zero tolerance, and
/// the narrative must literally carry the seal digest.
pub struct ClaimAuditor {
    config: AuditConfig,
    percent_mention: Regex,
    failure_mention: Regex,
    pass_mention: Regex,
    all_pass_mention: Regex,
}

impl ClaimAuditor {
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        Ok(Self {
            config,
            percent_mention: compile(r"(\d+(?:\.\d+)?)\s*%")?,
            failure_mention: compile(r"(\d+)\s+(?:tests?\s+)?(?:are\s+)?fail(?:ed|ing|ures?)?")?,
            pass_mention: compile(r"(\d+)\s+(?:tests?\s+)?pass(?:ed|ing)?")?,
            all_pass_mention: compile(r"(?i)all\s+(?:\d+\s+)?tests?\s+(?:are\s+)?pass(?:ed|ing)?")?,
        })
    }

    /// Audit free-form prose against the sheet.
    pub fn audit(&self, narrative: &str, sheet: &VerifiedFactSheet) -> AuditReport {
        let mut contradictions = Vec::new();
        let mut verifiable_claims = 0usize;
        let lowered = narrative.to_lowercase();
        let facts = &sheet.facts;

        // Rule 1: percentage mentions, zero tolerance. A vague qualifier in
        // front of a number is itself evidence of rounding unless the number
        // is exactly the sealed rate.
        for captures in self.percent_mention.captures_iter(narrative) {
            let Some(number) = captures.get(1) else { continue };
            let Ok(claimed) = number.as_str().parse::<f64>() else { continue };
            verifiable_claims += 1;
            let exact = (claimed - facts.success_rate_percent).abs() < f64::EPSILON;
            if exact {
                continue;
            }
            let claim_start = captures.get(0).map(|m| m.start()).unwrap_or(0);
            let claimed_value = if self.has_vague_qualifier(narrative, claim_start) {
                format!("~{}%", number.as_str())
            } else {
                format!("{}%", number.as_str())
            };
            contradictions.push(Contradiction::new(
                ContradictionKind::RoundedSuccessRate,
                snippet(narrative, claim_start),
                claimed_value,
                format!("{:.1}%", facts.success_rate_percent),
            ));
        }

        // Rule 2: failure counts and minimizing language.
        for captures in self.failure_mention.captures_iter(narrative) {
            let Some(number) = captures.get(1) else { continue };
            let Ok(claimed) = number.as_str().parse::<u64>() else { continue };
            verifiable_claims += 1;
            if claimed != facts.failed_count {
                contradictions.push(Contradiction::new(
                    ContradictionKind::MinimizedFailureCount,
                    snippet(narrative, captures.get(0).map(|m| m.start()).unwrap_or(0)),
                    claimed.to_string(),
                    facts.failed_count.to_string(),
                ));
            }
        }
        if facts.failed_count > 0 {
            if self.all_pass_mention.is_match(narrative) {
                verifiable_claims += 1;
                contradictions.push(Contradiction::new(
                    ContradictionKind::MinimizedFailureCount,
                    "all tests passing",
                    "0 failures",
                    facts.failed_count.to_string(),
                ));
            }
            for term in &self.config.minimizing_terms {
                if let Some(pos) = lowered.find(term.as_str()) {
                    if mentions_failure_nearby(&lowered, pos) {
                        verifiable_claims += 1;
                        contradictions.push(Contradiction::new(
                            ContradictionKind::MinimizedFailureCount,
                            snippet(narrative, pos),
                            term.clone(),
                            format!("{} failing tests", facts.failed_count),
                        ));
                    }
                }
            }
        }

        // Rule 3: deployment recommendations against the sealed flag.
        for phrase in &self.config.deployment_phrases {
            if let Some(pos) = lowered.find(phrase.as_str()) {
                verifiable_claims += 1;
                if !facts.deployment_allowed {
                    contradictions.push(Contradiction::new(
                        ContradictionKind::FalseDeploymentApproval,
                        snippet(narrative, pos),
                        phrase.clone(),
                        "deployment_allowed = false",
                    ));
                }
            }
        }

        // Rule 4: the narrative must literally carry the seal digest.
        if narrative.contains(&sheet.seal.to_hex()) {
            verifiable_claims += 1;
        } else {
            contradictions.push(Contradiction::new(
                ContradictionKind::MissingSealReference,
                "",
                "<no seal reference>",
                sheet.seal.to_hex(),
            ));
        }

        // Rule 5: pass counts with no matching fact.
        for captures in self.pass_mention.captures_iter(narrative) {
            let Some(number) = captures.get(1) else { continue };
            let Ok(claimed) = number.as_str().parse::<u64>() else { continue };
            verifiable_claims += 1;
            if claimed != facts.passed_count {
                contradictions.push(Contradiction::new(
                    ContradictionKind::UnsupportedClaim,
                    snippet(narrative, captures.get(0).map(|m| m.start()).unwrap_or(0)),
                    claimed.to_string(),
                    facts.passed_count.to_string(),
                ));
            }
        }

        let outcome = if !contradictions.is_empty() {
            AuditOutcome::Contradicted
        } else if verifiable_claims == 0 {
            AuditOutcome::NoVerifiableClaims
        } else {
            AuditOutcome::AllClaimsVerified
        };
        tracing::info!(
            ?outcome,
            contradictions = contradictions.len(),
            claims = verifiable_claims,
            "audit complete"
        );
        AuditReport {
            outcome,
            contradictions,
        }
    }

    /// Audit a trust report by rendering it as prose and running the same
    /// rules; a machine-written report earns no exemption.
    pub fn audit_trust_report(&self, report: &TrustReport, sheet: &VerifiedFactSheet) -> AuditReport {
        self.audit(&report.narrative(), sheet)
    }

    // `claim_start` is a match offset into `narrative`; the window is
    // lowercased here rather than sliced out of a pre-lowercased copy,
    // since `to_lowercase` can change byte offsets.
    fn has_vague_qualifier(&self, narrative: &str, claim_start: usize) -> bool {
        let window_start = floor_char_boundary(narrative, claim_start.saturating_sub(24));
        let window = narrative[window_start..claim_start].to_lowercase();
        self.config
            .vague_qualifiers
            .iter()
            .any(|q| window.contains(q.as_str()))
    }
}

fn compile(pattern: &str) -> Result<Regex, AuditError> {
    Regex::new(pattern).map_err(|e| AuditError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Short excerpt of the narrative starting at a claim, for evidence.
fn snippet(narrative: &str, start: usize) -> String {
    narrative
        .get(start..)
        .unwrap_or("")
        .chars()
        .take(60)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Crude proximity check: a minimizing term only counts when failure
/// language appears in the same narrative region.
fn mentions_failure_nearby(lowered: &str, pos: usize) -> bool {
    let window_end = floor_char_boundary(lowered, (pos + 80).min(lowered.len()));
    let window_start = floor_char_boundary(lowered, pos.saturating_sub(80));
    let window = &lowered[window_start..window_end];
    window.contains("fail") || window.contains("issue") || window.contains("broken")
}

/// Largest char boundary at or below `idx`. The windows above are byte
/// budgets over possibly multi-byte text, so raw offsets must be clamped
/// before slicing.
fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
