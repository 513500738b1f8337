//! Claim auditing: narrative text versus sealed facts.
//!
//! The auditor extracts percentage, failure-count, pass-count and
//! deployment claims from prose and compares each against a
//! [`attest_types::VerifiedFactSheet`] with zero tolerance. It reports a
//! tri-state outcome so "nothing was checkable" never masquerades as
//! "everything checked out".

#![deny(unsafe_code)]

pub mod auditor;
pub mod config;
pub mod error;

pub use auditor::{AuditOutcome, AuditReport, ClaimAuditor};
pub use config::AuditConfig;
pub use error::AuditError;
