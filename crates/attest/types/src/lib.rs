#![deny(unsafe_code)]
//! # attest-types
//!
//! Shared data model for the attest verification engine.
//!
//! ## Key Types
//!
//! - [`Seal`] — BLAKE3 content seal proving a fact record was not altered
//! - [`RawTestRecord`] / [`TestRunFacts`] / [`VerifiedFactSheet`] — fact sealing
//! - [`Finding`] / [`TestCategory`] / [`Severity`] — analyzer observations
//! - [`TrustReport`] — run-level trust assessment
//! - [`Contradiction`] — narrative-vs-facts disagreement

pub mod contradiction;
pub mod facts;
pub mod finding;
pub mod record;
pub mod report;
pub mod seal;

pub use contradiction::{Contradiction, ContradictionKind};
pub use facts::{FactSheetWire, TestRunFacts, VerifiedFactSheet};
pub use finding::{Finding, Severity, TestCategory, RUN_SCOPE_ID};
pub use record::{RawTestRecord, TestOutcome};
pub use report::{TestVerdict, TrustReport};
pub use seal::{Seal, SealParseError};
