//! String operations: strlen, strncmp, and the append step of strcat.
//!
//! Strings are byte slices where a NUL byte (`0x00`) marks the logical end.
//! A slice with no NUL holds a string spanning the whole slice.

/// Returns the length of the string held in `s` (not counting the NUL).
///
/// Equivalent to C `strlen`, except the scan never leaves the slice: if no
/// NUL is found the full slice length is returned.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Compares at most `n` bytes of two strings.
///
/// Equivalent to C `strncmp`: stops at the first difference or after a NUL
/// present in both. Bytes past the end of a slice read as NUL.
///
/// Returns a negative value if `s1 < s2`, zero if equal, positive if `s1 > s2`.
pub fn strncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let a = s1.get(i).copied().unwrap_or(0);
        let b = s2.get(i).copied().unwrap_or(0);

        if a != b {
            return i32::from(a) - i32::from(b);
        }
        if a == 0 {
            return 0;
        }
    }
    0
}

/// Writes `src` into `tail` followed by a NUL terminator.
///
/// `tail` starts at the old terminator of the destination string and must
/// hold at least `src.len() + 1` bytes. Returns the number of bytes appended
/// (not counting the NUL).
pub fn strappend(tail: &mut [u8], src: &[u8]) -> usize {
    let n = src.len();
    tail[..n].copy_from_slice(src);
    tail[n] = 0;
    n
}
