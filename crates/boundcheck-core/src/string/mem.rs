//! Memory operations: memcpy, memset, memcmp.

use core::cmp::Ordering;

/// Copies the first `n` bytes of `src` into the first `n` bytes of `dest`.
///
/// Equivalent to C `memcpy` over already-validated ranges.
pub fn memcpy(dest: &mut [u8], src: &[u8], n: usize) {
    dest[..n].copy_from_slice(&src[..n]);
}

/// Fills the first `n` bytes of `dest` with `value`.
///
/// Equivalent to C `memset(dest, c, n)`.
pub fn memset(dest: &mut [u8], value: u8, n: usize) {
    dest[..n].fill(value);
}

/// Compares the first `n` bytes of `a` and `b` as unsigned bytes.
///
/// Equivalent to C `memcmp`.
pub fn memcmp(a: &[u8], b: &[u8], n: usize) -> Ordering {
    a[..n].cmp(&b[..n])
}
