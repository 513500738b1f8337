#[path = "e2e/seal_and_verify.rs"]
mod seal_and_verify;

#[path = "e2e/pipeline_to_score.rs"]
mod pipeline_to_score;

#[path = "e2e/audit_narratives.rs"]
mod audit_narratives;
