//! # boundcheck-core
//!
//! Bounds-checked replacements for `memcpy`, `strcat`, `memcmp`, `strncmp`
//! and `memset`, operating on byte slices.
//!
//! Two families share one validation engine (`boundcheck-membrane`):
//!
//! - [`checked`]: abort-on-violation. A violation writes one diagnostic line
//!   to stderr and terminates the process; callers never see a failure value.
//! - [`try_checked`]: error-returning. A violation is returned as a
//!   [`Violation`] and the destination is left untouched.
//!
//! A slice's length is its capacity. Strings are NUL-terminated byte strings
//! held in slices; a slice without a NUL holds a string of its full length.
//!
//! No `unsafe` code is permitted outside the diagnostic reporter.

#![deny(unsafe_code)]

pub mod checked;
#[allow(unsafe_code)]
pub mod diag;
mod request;
pub mod string;
pub mod try_checked;

pub use boundcheck_membrane::{ErrorCode, Violation};
pub use checked::{
    checked_memcmp, checked_memcpy, checked_memcpy_offset, checked_memcpy_robust, checked_memset,
    checked_strcat, checked_strncmp,
};
pub use try_checked::{
    try_checked_memcmp, try_checked_memcpy, try_checked_memcpy_offset, try_checked_memcpy_robust,
    try_checked_memset, try_checked_strcat, try_checked_strncmp,
};
