//! ABI layer for the bounds-checked `<string.h>` wrappers.
//!
//! Each operation has one private `*_verdict` function that validates the
//! caller-declared bounds through the membrane and, only if they pass,
//! performs the operation over the cleared range. The exported symbols are
//! thin shells around it:
//! - `checked_*` abort the process with a diagnostic line on violation.
//! - `try_checked_*` return 0 on success, 34 or 75 on violation.
//!
//! # Safety
//!
//! Sizes are trusted as declared. A caller that passes a non-null pointer
//! must make the declared number of bytes valid (readable, and writable for
//! destinations). Single-bound copies and `*_strcat` sources carry no size;
//! the caller guarantees `count` readable bytes, or a NUL-terminated string.
//! Source and destination regions must not overlap.

use std::ffi::{c_char, c_int, c_void};
use std::slice;

use boundcheck_core::diag::enforce;
use boundcheck_core::string::{memcmp, memcpy, memset, strappend, strncmp};
use boundcheck_membrane::{
    BufferView, Clearance, Request, SUCCESS, Violation, require_non_null, validate,
};

use crate::util::{scan_c_string, status};

/// Copy `cleared.len` bytes from `src` to `dst + cleared.offset`.
///
/// # Safety
///
/// Both pointers are non-null and valid for the cleared range.
unsafe fn perform_copy(dst: *mut c_void, src: *const c_void, cleared: Clearance) {
    // SAFETY: validate() accepted this range against the declared bounds.
    let dest =
        unsafe { slice::from_raw_parts_mut(dst.cast::<u8>().add(cleared.offset), cleared.len) };
    // SAFETY: as above; the source is at least `cleared.len` bytes.
    let source = unsafe { slice::from_raw_parts(src.cast::<u8>(), cleared.len) };
    memcpy(dest, source, cleared.len);
}

unsafe fn copy_verdict(
    dst: *mut c_void,
    dst_size: usize,
    src: *const c_void,
    count: usize,
) -> Result<(), Violation> {
    let cleared = validate(&Request::Copy {
        dst: BufferView::new(dst.addr(), dst_size),
        src: BufferView::unbounded(src.addr()),
        count,
    })?;
    // SAFETY: range cleared above.
    unsafe { perform_copy(dst, src, cleared) };
    Ok(())
}

unsafe fn offset_copy_verdict(
    dst: *mut c_void,
    dst_size: usize,
    offset: usize,
    src: *const c_void,
    count: usize,
) -> Result<(), Violation> {
    let cleared = validate(&Request::OffsetCopy {
        dst: BufferView::new(dst.addr(), dst_size),
        src: BufferView::unbounded(src.addr()),
        offset,
        count,
    })?;
    // SAFETY: offset + count <= dst_size, checked above.
    unsafe { perform_copy(dst, src, cleared) };
    Ok(())
}

unsafe fn robust_copy_verdict(
    dst: *mut c_void,
    dst_size: usize,
    src: *const c_void,
    src_size: usize,
    count: usize,
) -> Result<(), Violation> {
    let cleared = validate(&Request::BoundedCopy {
        dst: BufferView::new(dst.addr(), dst_size),
        src: BufferView::new(src.addr(), src_size),
        count,
    })?;
    // SAFETY: count fits both declared sizes.
    unsafe { perform_copy(dst, src, cleared) };
    Ok(())
}

unsafe fn concat_verdict(
    dst: *mut c_char,
    dst_size: usize,
    src: *const c_char,
) -> Result<(), Violation> {
    let dst_view = BufferView::new(dst.addr(), dst_size);
    require_non_null(dst_view, BufferView::unbounded(src.addr()))?;
    // SAFETY: the destination is readable for its declared size and the
    // source is a C string; both are non-null.
    let (dst_len, _) = unsafe { scan_c_string(dst, Some(dst_size)) };
    let (src_len, _) = unsafe { scan_c_string(src, None) };

    let cleared = validate(&Request::Concat {
        dst: dst_view,
        dst_len,
        src_len,
    })?;
    // SAFETY: dst_len + src_len + 1 <= dst_size after validation.
    let dest = unsafe {
        slice::from_raw_parts_mut(dst.cast::<u8>(), cleared.offset + cleared.len + 1)
    };
    let source = unsafe { slice::from_raw_parts(src.cast::<u8>(), cleared.len) };
    strappend(&mut dest[cleared.offset..], source);
    Ok(())
}

unsafe fn compare_verdict(
    lhs: *const c_void,
    lhs_size: usize,
    rhs: *const c_void,
    rhs_size: usize,
    num: usize,
) -> Result<c_int, Violation> {
    let cleared = validate(&Request::Compare {
        lhs: BufferView::new(lhs.addr(), lhs_size),
        rhs: BufferView::new(rhs.addr(), rhs_size),
        count: num,
    })?;
    // SAFETY: num is within both declared sizes.
    let a = unsafe { slice::from_raw_parts(lhs.cast::<u8>(), cleared.len) };
    let b = unsafe { slice::from_raw_parts(rhs.cast::<u8>(), cleared.len) };
    Ok(memcmp(a, b, cleared.len) as c_int)
}

unsafe fn str_compare_verdict(
    lhs: *const c_char,
    lhs_size: usize,
    rhs: *const c_char,
    rhs_size: usize,
    count: usize,
) -> Result<c_int, Violation> {
    let cleared = validate(&Request::StrCompare {
        lhs: BufferView::new(lhs.addr(), lhs_size),
        rhs: BufferView::new(rhs.addr(), rhs_size),
        count,
    })?;
    // SAFETY: count is within both declared sizes.
    let a = unsafe { slice::from_raw_parts(lhs.cast::<u8>(), cleared.len) };
    let b = unsafe { slice::from_raw_parts(rhs.cast::<u8>(), cleared.len) };
    Ok(strncmp(a, b, cleared.len))
}

unsafe fn fill_verdict(
    dst: *mut c_void,
    dst_size: usize,
    ch: c_int,
    count: usize,
) -> Result<(), Violation> {
    let cleared = validate(&Request::Fill {
        dst: BufferView::new(dst.addr(), dst_size),
        count,
    })?;
    // SAFETY: count <= dst_size.
    let dest = unsafe { slice::from_raw_parts_mut(dst.cast::<u8>(), cleared.len) };
    // C semantics: the fill byte is `ch` converted to unsigned char.
    memset(dest, ch as u8, cleared.len);
    Ok(())
}

/// Write a successful comparison result through `out`.
unsafe fn deliver(verdict: Result<c_int, Violation>, out: *mut c_int) -> c_int {
    if out.is_null() {
        return Violation::NullPointer.raw_code();
    }
    match verdict {
        Ok(sign) => {
            // SAFETY: out is non-null and caller-provided.
            unsafe { out.write(sign) };
            SUCCESS
        }
        Err(violation) => violation.raw_code(),
    }
}

// ---------------------------------------------------------------------------
// memcpy
// ---------------------------------------------------------------------------

/// Copy `count` bytes to `destination`, aborting if `count` exceeds
/// `destination_size`. Returns `destination`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn checked_memcpy(
    destination: *mut c_void,
    destination_size: usize,
    source: *const c_void,
    count: usize,
) -> *mut c_void {
    enforce("checked_memcpy", unsafe {
        copy_verdict(destination, destination_size, source, count)
    });
    destination
}

/// Error-returning form of [`checked_memcpy`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn try_checked_memcpy(
    destination: *mut c_void,
    destination_size: usize,
    source: *const c_void,
    count: usize,
) -> c_int {
    status(unsafe { copy_verdict(destination, destination_size, source, count) })
}

/// Copy `count` bytes to `destination + offset`.
///
/// `offset` must be strictly less than `destination_size` even for a zero
/// `count`. Returns `destination`, not the offset position.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn checked_memcpy_offset(
    destination: *mut c_void,
    destination_size: usize,
    offset: usize,
    source: *const c_void,
    count: usize,
) -> *mut c_void {
    enforce("checked_memcpy_offset", unsafe {
        offset_copy_verdict(destination, destination_size, offset, source, count)
    });
    destination
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn try_checked_memcpy_offset(
    destination: *mut c_void,
    destination_size: usize,
    offset: usize,
    source: *const c_void,
    count: usize,
) -> c_int {
    status(unsafe { offset_copy_verdict(destination, destination_size, offset, source, count) })
}

/// Copy `count` bytes with both the source and destination sizes enforced.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn checked_memcpy_robust(
    destination: *mut c_void,
    destination_size: usize,
    source: *const c_void,
    source_size: usize,
    count: usize,
) -> *mut c_void {
    enforce("checked_memcpy_robust", unsafe {
        robust_copy_verdict(destination, destination_size, source, source_size, count)
    });
    destination
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn try_checked_memcpy_robust(
    destination: *mut c_void,
    destination_size: usize,
    source: *const c_void,
    source_size: usize,
    count: usize,
) -> c_int {
    status(unsafe {
        robust_copy_verdict(destination, destination_size, source, source_size, count)
    })
}

// ---------------------------------------------------------------------------
// strcat
// ---------------------------------------------------------------------------

/// Append `source` to the C string in `destination`.
///
/// The destination terminator is searched for within `destination_size`
/// bytes; if none is found the buffer is treated as full. Returns
/// `destination`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn checked_strcat(
    destination: *mut c_char,
    destination_size: usize,
    source: *const c_char,
) -> *mut c_char {
    enforce("checked_strcat", unsafe {
        concat_verdict(destination, destination_size, source)
    });
    destination
}

/// Returns 75 if the combined length wraps, 34 for any other violation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn try_checked_strcat(
    destination: *mut c_char,
    destination_size: usize,
    source: *const c_char,
) -> c_int {
    status(unsafe { concat_verdict(destination, destination_size, source) })
}

// ---------------------------------------------------------------------------
// memcmp / strncmp
// ---------------------------------------------------------------------------

/// Compare `num` bytes; aborts if `num` exceeds either declared size.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn checked_memcmp(
    ptr1: *const c_void,
    ptr1_size: usize,
    ptr2: *const c_void,
    ptr2_size: usize,
    num: usize,
) -> c_int {
    enforce("checked_memcmp", unsafe {
        compare_verdict(ptr1, ptr1_size, ptr2, ptr2_size, num)
    })
}

/// Comparison result goes to `*result`; the return value is the status.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn try_checked_memcmp(
    ptr1: *const c_void,
    ptr1_size: usize,
    ptr2: *const c_void,
    ptr2_size: usize,
    num: usize,
    result: *mut c_int,
) -> c_int {
    unsafe { deliver(compare_verdict(ptr1, ptr1_size, ptr2, ptr2_size, num), result) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn checked_strncmp(
    str1: *const c_char,
    str1_size: usize,
    str2: *const c_char,
    str2_size: usize,
    count: usize,
) -> c_int {
    enforce("checked_strncmp", unsafe {
        str_compare_verdict(str1, str1_size, str2, str2_size, count)
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn try_checked_strncmp(
    str1: *const c_char,
    str1_size: usize,
    str2: *const c_char,
    str2_size: usize,
    count: usize,
    result: *mut c_int,
) -> c_int {
    unsafe {
        deliver(
            str_compare_verdict(str1, str1_size, str2, str2_size, count),
            result,
        )
    }
}

// ---------------------------------------------------------------------------
// memset
// ---------------------------------------------------------------------------

/// Fill `count` bytes with `ch`; aborts if `count` exceeds
/// `destination_size`. Returns `destination`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn checked_memset(
    destination: *mut c_void,
    destination_size: usize,
    ch: c_int,
    count: usize,
) -> *mut c_void {
    enforce("checked_memset", unsafe {
        fill_verdict(destination, destination_size, ch, count)
    });
    destination
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn try_checked_memset(
    destination: *mut c_void,
    destination_size: usize,
    ch: c_int,
    count: usize,
) -> c_int {
    status(unsafe { fill_verdict(destination, destination_size, ch, count) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn copy_verdict_rejects_before_writing() {
        let mut dest = [0u8; 4];
        let src = [9u8; 8];
        let verdict = unsafe { copy_verdict(dest.as_mut_ptr().cast(), 4, src.as_ptr().cast(), 5) };
        assert_eq!(verdict, Err(Violation::overflow(5, 4)));
        assert_eq!(dest, [0u8; 4]);
    }

    #[test]
    fn null_source_is_rejected_after_size_check() {
        let mut dest = [0u8; 4];
        let too_big = unsafe { copy_verdict(dest.as_mut_ptr().cast(), 4, ptr::null(), 6) };
        assert_eq!(too_big, Err(Violation::overflow(6, 4)));
        let fits = unsafe { copy_verdict(dest.as_mut_ptr().cast(), 4, ptr::null(), 2) };
        assert_eq!(fits, Err(Violation::NullPointer));
    }

    #[test]
    fn concat_null_checked_before_scan() {
        let verdict = unsafe { concat_verdict(ptr::null_mut(), 8, c"x".as_ptr()) };
        assert_eq!(verdict, Err(Violation::NullPointer));
        let mut dest = *b"ab\0\0";
        let verdict = unsafe { concat_verdict(dest.as_mut_ptr().cast(), 4, ptr::null()) };
        assert_eq!(verdict, Err(Violation::NullPointer));
    }

    #[test]
    fn deliver_requires_out_pointer() {
        assert_eq!(unsafe { deliver(Ok(1), ptr::null_mut()) }, 34);
        let mut out = 7;
        assert_eq!(unsafe { deliver(Err(Violation::OutOfBoundsRead), &mut out) }, 34);
        assert_eq!(out, 7);
        assert_eq!(unsafe { deliver(Ok(-1), &mut out) }, 0);
        assert_eq!(out, -1);
    }

    #[test]
    fn fill_truncates_ch_to_byte() {
        let mut dest = [0u8; 3];
        let verdict = unsafe { fill_verdict(dest.as_mut_ptr().cast(), 3, 0x1FF, 2) };
        assert_eq!(verdict, Ok(()));
        assert_eq!(dest, [0xFF, 0xFF, 0]);
    }
}
