//! Validation engine for boundcheck.
//!
//! This crate decides, from a description of a memory or string operation,
//! whether performing it would stay inside the caller-declared bounds. It
//! never touches the memory itself: both wrapper families (abort-on-violation
//! and error-returning) build a [`Request`], hand it to [`validate`], and act
//! on the returned [`Clearance`] or [`Violation`].
//!
//! # Architecture
//!
//! ```text
//! wrapper -> Request -> validate() -> Ok(Clearance)  -> unchecked primitive
//!                                  -> Err(Violation) -> abort | error code
//! ```
//!
//! - **Buffer views** (`view`): caller-declared `(addr, capacity)` pairs
//! - **Decision function** (`check`): per-operation predicates in a fixed order
//! - **Violation taxonomy** (`violation`): classified failures and the stable
//!   error-code contract

#![deny(unsafe_code)]

pub mod check;
pub mod view;
pub mod violation;

pub use check::{Clearance, Request, checked_add_lengths, require_non_null, validate};
pub use view::BufferView;
pub use violation::{
    ERR_POTENTIAL_BUFFER_OVERFLOW, ERR_POTENTIAL_INTEGER_OVERFLOW, ErrorCode, SUCCESS, SizeReport,
    Violation,
};
