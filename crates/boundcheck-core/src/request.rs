//! Request construction and cleared-range execution shared by both families.

use core::cmp::Ordering;

use boundcheck_membrane::{BufferView, Clearance, Request};

use crate::string::{memcmp, memcpy, memset, strappend, strlen, strncmp};

pub(crate) fn copy(dest: &[u8], src: &[u8], count: usize) -> Request {
    Request::Copy {
        dst: BufferView::of_slice(dest),
        src: BufferView::of_slice(src),
        count,
    }
}

pub(crate) fn offset_copy(dest: &[u8], offset: usize, src: &[u8], count: usize) -> Request {
    Request::OffsetCopy {
        dst: BufferView::of_slice(dest),
        src: BufferView::of_slice(src),
        offset,
        count,
    }
}

pub(crate) fn bounded_copy(dest: &[u8], src: &[u8], count: usize) -> Request {
    Request::BoundedCopy {
        dst: BufferView::of_slice(dest),
        src: BufferView::of_slice(src),
        count,
    }
}

pub(crate) fn concat(dest: &[u8], src: &[u8]) -> Request {
    Request::Concat {
        dst: BufferView::of_slice(dest),
        dst_len: strlen(dest),
        src_len: strlen(src),
    }
}

pub(crate) fn compare(lhs: &[u8], rhs: &[u8], count: usize) -> Request {
    Request::Compare {
        lhs: BufferView::of_slice(lhs),
        rhs: BufferView::of_slice(rhs),
        count,
    }
}

pub(crate) fn str_compare(lhs: &[u8], rhs: &[u8], count: usize) -> Request {
    Request::StrCompare {
        lhs: BufferView::of_slice(lhs),
        rhs: BufferView::of_slice(rhs),
        count,
    }
}

pub(crate) fn fill(dest: &[u8], count: usize) -> Request {
    Request::Fill {
        dst: BufferView::of_slice(dest),
        count,
    }
}

pub(crate) fn apply_copy(dest: &mut [u8], src: &[u8], cleared: Clearance) {
    memcpy(&mut dest[cleared.offset..], src, cleared.len);
}

pub(crate) fn apply_concat(dest: &mut [u8], src: &[u8], cleared: Clearance) {
    strappend(&mut dest[cleared.offset..], &src[..cleared.len]);
}

pub(crate) fn apply_fill(dest: &mut [u8], value: u8, cleared: Clearance) {
    memset(dest, value, cleared.len);
}

pub(crate) fn apply_compare(lhs: &[u8], rhs: &[u8], cleared: Clearance) -> Ordering {
    memcmp(lhs, rhs, cleared.len)
}

pub(crate) fn apply_str_compare(lhs: &[u8], rhs: &[u8], cleared: Clearance) -> Ordering {
    strncmp(lhs, rhs, cleared.len).cmp(&0)
}
