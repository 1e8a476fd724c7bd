//! Pointer helpers shared by the ABI entry points.

use std::ffi::{c_char, c_int};

use boundcheck_membrane::{SUCCESS, Violation};

/// Scan a C string with an optional hard bound.
///
/// Returns `(len, terminated)`: `len` is the byte count before the first NUL
/// (or the bound, if no NUL was seen within it).
///
/// # Safety
///
/// `ptr` must be non-null and readable up to the discovered length, or up to
/// `bound` when one is given.
pub(crate) unsafe fn scan_c_string(ptr: *const c_char, bound: Option<usize>) -> (usize, bool) {
    match bound {
        Some(limit) => {
            for i in 0..limit {
                // SAFETY: caller guarantees `limit` readable bytes.
                if unsafe { *ptr.add(i) } == 0 {
                    return (i, true);
                }
            }
            (limit, false)
        }
        None => {
            let mut i = 0usize;
            // SAFETY: caller guarantees a NUL-terminated string.
            while unsafe { *ptr.add(i) } != 0 {
                i += 1;
            }
            (i, true)
        }
    }
}

/// Error-family status for a verdict: 0 on success, otherwise the
/// violation's code.
#[inline]
pub(crate) fn status<T>(verdict: Result<T, Violation>) -> c_int {
    match verdict {
        Ok(_) => SUCCESS,
        Err(violation) => violation.raw_code(),
    }
}
