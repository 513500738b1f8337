//! Analyzer framework and the shipped analyzer variants.
//!
//! Each [`Analyzer`] inspects one test's source or execution trace and
//! emits [`attest_types::Finding`]s. The set is closed and registered
//! explicitly via [`AnalyzerSet::standard`]; the [`Pipeline`] fans the
//! set out over all tests with bounded concurrency and substitutes an
//! `unavailable` finding for any analyzer/test pair that cannot complete,
//! so downstream scoring always sees a total result.

#![deny(unsafe_code)]

pub mod analyzer;
pub mod claim_cross_reference;
pub mod config;
pub mod deceptive_pattern;
pub mod error;
pub mod execution_timing;
pub mod feature_hallucination;
pub mod honeypot_integrity;
pub mod implementation_completeness;
pub mod live_integration;
pub mod mock_usage;
pub mod patterns;
pub mod pipeline;
pub mod unit;

pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use pipeline::{AnalyzerSet, Pipeline};
pub use unit::{AnalysisUnit, ExecutionTrace, FunctionSource, RunArtifacts, TestSource};
