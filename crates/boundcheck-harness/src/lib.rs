//! Conformance harness for boundcheck.
//!
//! This crate provides:
//! - Fixture loading: JSON case sets under `tests/fixtures/`
//! - Execution: error-family cases in process, abort-family cases in a
//!   child process so a violation can terminate it
//! - Report generation: markdown or JSON, with a SHA-256 digest per fixture

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod execute;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet, Mode};
pub use report::{ConformanceReport, FixtureDigest};
pub use runner::TestRunner;
pub use verify::{FamilyTally, OutcomeClass, VerificationResult, VerificationSummary};
