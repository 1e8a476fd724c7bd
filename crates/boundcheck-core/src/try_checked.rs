//! Error-returning wrappers.
//!
//! Same validation as [`crate::checked`], but a violation comes back as
//! `Err(Violation)` with the destination untouched and nothing written to
//! stderr. Use [`Violation::code`] for the numeric contract (34 / 75).
//!
//! Ignoring the result forfeits the safety guarantee: the operation simply
//! did not happen.

use core::cmp::Ordering;

use boundcheck_membrane::{Violation, validate};

use crate::request;

/// Copies `count` bytes from `src` to the start of `dest`.
pub fn try_checked_memcpy(dest: &mut [u8], src: &[u8], count: usize) -> Result<(), Violation> {
    let cleared = validate(&request::copy(dest, src, count))?;
    request::apply_copy(dest, src, cleared);
    Ok(())
}

/// Copies `count` bytes from `src` to `dest[offset..]`.
pub fn try_checked_memcpy_offset(
    dest: &mut [u8],
    offset: usize,
    src: &[u8],
    count: usize,
) -> Result<(), Violation> {
    let cleared = validate(&request::offset_copy(dest, offset, src, count))?;
    request::apply_copy(dest, src, cleared);
    Ok(())
}

/// Copies `count` bytes with both bounds enforced.
pub fn try_checked_memcpy_robust(
    dest: &mut [u8],
    src: &[u8],
    count: usize,
) -> Result<(), Violation> {
    let cleared = validate(&request::bounded_copy(dest, src, count))?;
    request::apply_copy(dest, src, cleared);
    Ok(())
}

/// Appends the string in `src` to the string in `dest`.
///
/// Fails with [`Violation::IntegerOverflow`] if the combined length wraps,
/// and with a buffer overflow if `dest` is empty or lacks room for the
/// result plus terminator.
pub fn try_checked_strcat(dest: &mut [u8], src: &[u8]) -> Result<(), Violation> {
    let cleared = validate(&request::concat(dest, src))?;
    request::apply_concat(dest, src, cleared);
    Ok(())
}

/// Compares the first `num` bytes of `lhs` and `rhs`.
pub fn try_checked_memcmp(lhs: &[u8], rhs: &[u8], num: usize) -> Result<Ordering, Violation> {
    let cleared = validate(&request::compare(lhs, rhs, num))?;
    Ok(request::apply_compare(lhs, rhs, cleared))
}

/// Compares at most `count` bytes of two strings.
pub fn try_checked_strncmp(lhs: &[u8], rhs: &[u8], count: usize) -> Result<Ordering, Violation> {
    let cleared = validate(&request::str_compare(lhs, rhs, count))?;
    Ok(request::apply_str_compare(lhs, rhs, cleared))
}

/// Sets the first `count` bytes of `dest` to `value`.
pub fn try_checked_memset(dest: &mut [u8], value: u8, count: usize) -> Result<(), Violation> {
    let cleared = validate(&request::fill(dest, count))?;
    request::apply_fill(dest, value, cleared);
    Ok(())
}
