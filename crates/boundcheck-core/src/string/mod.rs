//! Unchecked byte and string primitives.
//!
//! These are the operations the wrappers delegate to after validation. They
//! index their arguments directly and assume the lengths were cleared by the
//! validation engine; calling them with out-of-range lengths panics.

pub mod mem;
pub mod str;

pub use mem::{memcmp, memcpy, memset};
pub use str::{strappend, strlen, strncmp};
