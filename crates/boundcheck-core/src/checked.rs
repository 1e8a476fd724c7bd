//! Abort-on-violation wrappers.
//!
//! Each function validates its arguments and then either performs the
//! operation or writes a diagnostic line to stderr and aborts the process
//! (see [`crate::diag`]). None of them returns a failure value: a violation
//! here is a programming defect, not a runtime condition.

use core::cmp::Ordering;

use boundcheck_membrane::validate;

use crate::diag::enforce;
use crate::request;

/// Copies `count` bytes from `src` to the start of `dest`.
///
/// Aborts if `count > dest.len()` (or, since a slice bounds the source too,
/// if `count > src.len()`). Returns `dest`.
pub fn checked_memcpy<'a>(dest: &'a mut [u8], src: &[u8], count: usize) -> &'a mut [u8] {
    let cleared = enforce(
        "checked_memcpy",
        validate(&request::copy(dest, src, count)),
    );
    request::apply_copy(dest, src, cleared);
    dest
}

/// Copies `count` bytes from `src` to `dest[offset..]`.
///
/// `offset` must land strictly inside `dest`, even when `count` is zero, and
/// the copy must end inside it. Returns the whole of `dest`, not the offset
/// position.
pub fn checked_memcpy_offset<'a>(
    dest: &'a mut [u8],
    offset: usize,
    src: &[u8],
    count: usize,
) -> &'a mut [u8] {
    let cleared = enforce(
        "checked_memcpy_offset",
        validate(&request::offset_copy(dest, offset, src, count)),
    );
    request::apply_copy(dest, src, cleared);
    dest
}

/// Copies `count` bytes with both `dest` and `src` bounds enforced.
pub fn checked_memcpy_robust<'a>(dest: &'a mut [u8], src: &[u8], count: usize) -> &'a mut [u8] {
    let cleared = enforce(
        "checked_memcpy_robust",
        validate(&request::bounded_copy(dest, src, count)),
    );
    request::apply_copy(dest, src, cleared);
    dest
}

/// Appends the string in `src` to the string in `dest`.
///
/// The result, plus its terminator, must fit in `dest`. A `dest` with no NUL
/// is treated as full and always aborts.
pub fn checked_strcat<'a>(dest: &'a mut [u8], src: &[u8]) -> &'a mut [u8] {
    let cleared = enforce("checked_strcat", validate(&request::concat(dest, src)));
    request::apply_concat(dest, src, cleared);
    dest
}

/// Compares the first `num` bytes of `lhs` and `rhs`.
///
/// Aborts with an out-of-bounds read if `num` exceeds either length.
pub fn checked_memcmp(lhs: &[u8], rhs: &[u8], num: usize) -> Ordering {
    let cleared = enforce(
        "checked_memcmp",
        validate(&request::compare(lhs, rhs, num)),
    );
    request::apply_compare(lhs, rhs, cleared)
}

/// Compares at most `count` bytes of two strings, stopping at a shared NUL.
pub fn checked_strncmp(lhs: &[u8], rhs: &[u8], count: usize) -> Ordering {
    let cleared = enforce(
        "checked_strncmp",
        validate(&request::str_compare(lhs, rhs, count)),
    );
    request::apply_str_compare(lhs, rhs, cleared)
}

/// Sets the first `count` bytes of `dest` to `value`.
pub fn checked_memset(dest: &mut [u8], value: u8, count: usize) -> &mut [u8] {
    let cleared = enforce("checked_memset", validate(&request::fill(dest, count)));
    request::apply_fill(dest, value, cleared);
    dest
}
