// Every export takes raw pointers plus caller-declared sizes; the contract is
// stated once per function family in string_abi rather than per symbol.
#![allow(clippy::missing_safety_doc)]
//! # boundcheck-abi
//!
//! `extern "C"` boundary for the boundcheck wrappers.
//!
//! Builds a `cdylib` exporting `checked_*` (abort on violation) and
//! `try_checked_*` (return 0 / 34 / 75) symbols with C signatures. Each
//! entry point turns its pointer/size pairs into membrane views, validates,
//! and only then builds slices over the cleared range and hands them to the
//! core primitives.
//!
//! ```text
//! C caller -> ABI entry (this crate) -> membrane validate -> core primitive
//! ```

pub mod string_abi;
mod util;

pub use boundcheck_membrane::{
    ERR_POTENTIAL_BUFFER_OVERFLOW, ERR_POTENTIAL_INTEGER_OVERFLOW, SUCCESS,
};
