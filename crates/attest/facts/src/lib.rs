//! Fact extraction and sealing for test runs.
//!
//! A raw run report is normalized into [`attest_types::TestRunFacts`] by
//! [`extractor::extract`], then frozen into a [`attest_types::VerifiedFactSheet`]
//! by [`seal_engine::seal`]. Anyone holding a sheet can recompute the seal
//! from its facts and detect tampering without trusting the producer.
//!
//! # Modules
//! - [`report_input`]: wire schema for external runner reports
//! - [`extractor`]: record validation and canonical fact derivation
//! - [`seal_engine`]: canonical byte encoding and BLAKE3 sealing
//! - [`error`]: crate error type

#![deny(unsafe_code)]

pub mod error;
pub mod extractor;
pub mod report_input;
pub mod seal_engine;

pub use error::FactError;
pub use extractor::extract;
pub use report_input::{RunReportWire, RunSummaryWire, TestEntryWire};
pub use seal_engine::{compute_seal, ensure_intact, seal, verify, SEAL_VERSION};
