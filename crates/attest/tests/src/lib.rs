//! Cross-crate suites for the attest workspace.
//!
//! The crate body is intentionally empty; everything lives under
//! `tests/`, mounted from `e2e_tests.rs` and `property_tests.rs`.
