//! Decision logic shared by the abort and error-returning families.
//!
//! Every wrapper describes its operation as a [`Request`] and calls
//! [`validate`] exactly once before touching memory. Predicates are evaluated
//! in a fixed order per operation kind; the first failing predicate decides
//! the reported [`Violation`].

use crate::view::BufferView;
use crate::violation::Violation;

/// An operation a wrapper wants to perform, with its declared bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Copy `count` bytes to the start of `dst`. Only `dst` is bounded for C
    /// callers; `src` is checked when its capacity is declared.
    Copy {
        dst: BufferView,
        src: BufferView,
        count: usize,
    },
    /// Copy `count` bytes to `dst + offset`.
    OffsetCopy {
        dst: BufferView,
        src: BufferView,
        offset: usize,
        count: usize,
    },
    /// Copy `count` bytes with both sides bounded.
    BoundedCopy {
        dst: BufferView,
        src: BufferView,
        count: usize,
    },
    /// Append a `src_len`-byte string to a `dst_len`-byte string held in `dst`.
    ///
    /// Both lengths are scanned by the wrapper before validation.
    Concat {
        dst: BufferView,
        dst_len: usize,
        src_len: usize,
    },
    /// Compare the first `count` bytes of two buffers.
    Compare {
        lhs: BufferView,
        rhs: BufferView,
        count: usize,
    },
    /// Compare at most `count` bytes of two strings.
    StrCompare {
        lhs: BufferView,
        rhs: BufferView,
        count: usize,
    },
    /// Set the first `count` bytes of `dst`.
    Fill { dst: BufferView, count: usize },
}

/// Byte range a validated operation may touch.
///
/// Writes (or reads, for comparisons) cover `offset..offset + len` of the
/// primary buffer. For [`Request::Concat`] the terminator goes at
/// `offset + len`, which is guaranteed to be inside the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clearance {
    /// First byte of the primary buffer that is touched.
    pub offset: usize,
    /// Number of bytes touched from `offset`.
    pub len: usize,
}

impl Clearance {
    #[must_use]
    const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

/// Decide whether `request` is safe to perform.
pub fn validate(request: &Request) -> Result<Clearance, Violation> {
    match *request {
        Request::Copy { dst, src, count } => {
            if count > dst.capacity {
                return Err(Violation::overflow(count, dst.capacity));
            }
            require_non_null(dst, src)?;
            if count > src.capacity {
                return Err(Violation::OutOfBoundsRead);
            }
            Ok(Clearance::new(0, count))
        }
        Request::OffsetCopy {
            dst,
            src,
            offset,
            count,
        } => {
            let remaining = remaining_after(dst.capacity, offset);
            if count > dst.capacity || offset >= dst.capacity {
                return Err(Violation::overflow(count, remaining));
            }
            if count > remaining {
                return Err(Violation::overflow(count, remaining));
            }
            require_non_null(dst, src)?;
            if count > src.capacity {
                return Err(Violation::OutOfBoundsRead);
            }
            Ok(Clearance::new(offset, count))
        }
        Request::BoundedCopy { dst, src, count } => {
            if count > dst.capacity || count > src.capacity {
                return Err(Violation::overflow_unsized());
            }
            require_non_null(dst, src)?;
            Ok(Clearance::new(0, count))
        }
        Request::Concat {
            dst,
            dst_len,
            src_len,
        } => {
            if dst.capacity == 0 {
                return Err(Violation::overflow(dst_len.saturating_add(src_len), 0));
            }
            let total = checked_add_lengths(dst_len, src_len).ok_or(Violation::IntegerOverflow)?;
            // capacity > 0 here, so the terminator slot subtraction cannot wrap.
            let room = dst.capacity - 1;
            if room < total {
                return Err(Violation::overflow(total, room));
            }
            if dst.is_null() {
                return Err(Violation::NullPointer);
            }
            Ok(Clearance::new(dst_len, src_len))
        }
        Request::Compare { lhs, rhs, count } | Request::StrCompare { lhs, rhs, count } => {
            if count > lhs.capacity || count > rhs.capacity {
                return Err(Violation::OutOfBoundsRead);
            }
            require_non_null(lhs, rhs)?;
            Ok(Clearance::new(0, count))
        }
        Request::Fill { dst, count } => {
            if count > dst.capacity {
                return Err(Violation::overflow(count, dst.capacity));
            }
            if dst.is_null() {
                return Err(Violation::NullPointer);
            }
            Ok(Clearance::new(0, count))
        }
    }
}

/// Add two lengths, detecting wrap-around with the `a + b < a` test.
///
/// Returns `None` when the sum does not fit in `usize`.
#[must_use]
pub const fn checked_add_lengths(a: usize, b: usize) -> Option<usize> {
    let sum = a.wrapping_add(b);
    if sum < a { None } else { Some(sum) }
}

/// Fail with [`Violation::NullPointer`] if either view is absent.
pub const fn require_non_null(a: BufferView, b: BufferView) -> Result<(), Violation> {
    if a.is_null() || b.is_null() {
        Err(Violation::NullPointer)
    } else {
        Ok(())
    }
}

/// Bytes left in a buffer past `offset`, or 0 when `offset` is not inside it.
const fn remaining_after(capacity: usize, offset: usize) -> usize {
    if offset < capacity {
        capacity - offset
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::SizeReport;

    const DST: usize = 0x1000;
    const SRC: usize = 0x2000;

    fn view(addr: usize, capacity: usize) -> BufferView {
        BufferView::new(addr, capacity)
    }

    fn copy(dst_cap: usize, count: usize) -> Request {
        Request::Copy {
            dst: view(DST, dst_cap),
            src: BufferView::unbounded(SRC),
            count,
        }
    }

    #[test]
    fn copy_allows_exact_fit() {
        assert_eq!(validate(&copy(8, 8)), Ok(Clearance::new(0, 8)));
        assert_eq!(validate(&copy(8, 0)), Ok(Clearance::new(0, 0)));
    }

    #[test]
    fn copy_rejects_over_capacity_with_sizes() {
        assert_eq!(validate(&copy(8, 10)), Err(Violation::overflow(10, 8)));
    }

    #[test]
    fn copy_grid_matches_predicate() {
        for cap in 0..16 {
            for count in 0..20 {
                let ok = validate(&copy(cap, count)).is_ok();
                assert_eq!(ok, count <= cap, "cap={cap} count={count}");
            }
        }
    }

    #[test]
    fn copy_overflow_reported_before_null() {
        let request = Request::Copy {
            dst: view(0, 4),
            src: BufferView::unbounded(0),
            count: 5,
        };
        assert_eq!(validate(&request), Err(Violation::overflow(5, 4)));
    }

    #[test]
    fn copy_null_rejected_even_for_zero_count() {
        let request = Request::Copy {
            dst: view(DST, 4),
            src: BufferView::unbounded(0),
            count: 0,
        };
        assert_eq!(validate(&request), Err(Violation::NullPointer));
    }

    #[test]
    fn copy_bounded_source_is_checked_last() {
        let request = Request::Copy {
            dst: view(DST, 8),
            src: view(SRC, 2),
            count: 4,
        };
        assert_eq!(validate(&request), Err(Violation::OutOfBoundsRead));
    }

    fn offset_copy(cap: usize, offset: usize, count: usize) -> Request {
        Request::OffsetCopy {
            dst: view(DST, cap),
            src: BufferView::unbounded(SRC),
            offset,
            count,
        }
    }

    #[test]
    fn offset_equal_to_capacity_rejected_even_for_zero_count() {
        assert_eq!(
            validate(&offset_copy(8, 8, 0)),
            Err(Violation::overflow(0, 0))
        );
    }

    #[test]
    fn offset_copy_reports_remaining_capacity() {
        assert_eq!(
            validate(&offset_copy(8, 3, 9)),
            Err(Violation::overflow(9, 5))
        );
        assert_eq!(
            validate(&offset_copy(8, 3, 6)),
            Err(Violation::overflow(6, 5))
        );
    }

    #[test]
    fn offset_past_capacity_reports_zero_remaining() {
        assert_eq!(
            validate(&offset_copy(8, 100, 2)),
            Err(Violation::overflow(2, 0))
        );
    }

    #[test]
    fn offset_copy_grid() {
        for cap in 0..12 {
            for offset in 0..14 {
                for count in 0..14 {
                    let verdict = validate(&offset_copy(cap, offset, count));
                    let safe = offset < cap && count <= cap - offset;
                    assert_eq!(verdict.is_ok(), safe, "cap={cap} off={offset} n={count}");
                    if let Ok(c) = verdict {
                        assert_eq!(c, Clearance::new(offset, count));
                    }
                }
            }
        }
    }

    #[test]
    fn offset_copy_overflow_reported_before_null() {
        let request = Request::OffsetCopy {
            dst: view(0, 8),
            src: BufferView::unbounded(0),
            offset: 6,
            count: 4,
        };
        assert_eq!(validate(&request), Err(Violation::overflow(4, 2)));
    }

    #[test]
    fn offset_copy_null_before_read() {
        let null_src = Request::OffsetCopy {
            dst: view(DST, 8),
            src: view(0, 1),
            offset: 2,
            count: 4,
        };
        assert_eq!(validate(&null_src), Err(Violation::NullPointer));
        let null_dst = Request::OffsetCopy {
            dst: view(0, 8),
            src: view(SRC, 1),
            offset: 2,
            count: 4,
        };
        assert_eq!(validate(&null_dst), Err(Violation::NullPointer));
    }

    fn bounded(dst_cap: usize, src_cap: usize, count: usize) -> Request {
        Request::BoundedCopy {
            dst: view(DST, dst_cap),
            src: view(SRC, src_cap),
            count,
        }
    }

    #[test]
    fn bounded_copy_catches_each_side() {
        let overflow = Err(Violation::overflow_unsized());
        assert_eq!(validate(&bounded(8, 4, 6)), overflow);
        assert_eq!(validate(&bounded(4, 8, 6)), overflow);
        assert_eq!(validate(&bounded(4, 4, 6)), overflow);
        assert_eq!(validate(&bounded(8, 8, 6)), Ok(Clearance::new(0, 6)));
    }

    #[test]
    fn bounded_copy_overflow_before_null() {
        let request = Request::BoundedCopy {
            dst: view(0, 4),
            src: view(0, 8),
            count: 6,
        };
        assert_eq!(validate(&request), Err(Violation::overflow_unsized()));
        let fits = Request::BoundedCopy {
            dst: view(DST, 8),
            src: view(0, 8),
            count: 0,
        };
        assert_eq!(validate(&fits), Err(Violation::NullPointer));
    }

    fn concat(cap: usize, dst_len: usize, src_len: usize) -> Request {
        Request::Concat {
            dst: view(DST, cap),
            dst_len,
            src_len,
        }
    }

    #[test]
    fn concat_needs_room_for_terminator() {
        assert_eq!(validate(&concat(8, 3, 4)), Ok(Clearance::new(3, 4)));
        assert_eq!(validate(&concat(8, 3, 5)), Err(Violation::overflow(8, 7)));
    }

    #[test]
    fn concat_zero_capacity_checked_first() {
        assert_eq!(
            validate(&concat(0, 0, usize::MAX)),
            Err(Violation::overflow(usize::MAX, 0))
        );
    }

    #[test]
    fn concat_wrap_detected_before_room_check() {
        let request = concat(16, usize::MAX - 1, 4);
        assert_eq!(validate(&request), Err(Violation::IntegerOverflow));
    }

    #[test]
    fn concat_room_checked_before_null() {
        let spills = Request::Concat {
            dst: view(0, 4),
            dst_len: 3,
            src_len: 2,
        };
        assert_eq!(validate(&spills), Err(Violation::overflow(5, 3)));
        let wraps = Request::Concat {
            dst: view(0, 4),
            dst_len: usize::MAX,
            src_len: 1,
        };
        assert_eq!(validate(&wraps), Err(Violation::IntegerOverflow));
        let fits = Request::Concat {
            dst: view(0, 4),
            dst_len: 1,
            src_len: 1,
        };
        assert_eq!(validate(&fits), Err(Violation::NullPointer));
    }

    #[test]
    fn concat_grid() {
        for cap in 0..10 {
            for a in 0..10 {
                for b in 0..10 {
                    let ok = validate(&concat(cap, a, b)).is_ok();
                    assert_eq!(ok, a + b < cap, "cap={cap} a={a} b={b}");
                }
            }
        }
    }

    #[test]
    fn compare_rejects_either_side() {
        let lhs_short = Request::Compare {
            lhs: view(DST, 2),
            rhs: view(SRC, 8),
            count: 4,
        };
        let rhs_short = Request::StrCompare {
            lhs: view(DST, 8),
            rhs: view(SRC, 2),
            count: 4,
        };
        assert_eq!(validate(&lhs_short), Err(Violation::OutOfBoundsRead));
        assert_eq!(validate(&rhs_short), Err(Violation::OutOfBoundsRead));
    }

    #[test]
    fn compare_oob_reported_before_null() {
        let request = Request::Compare {
            lhs: view(0, 2),
            rhs: view(SRC, 8),
            count: 4,
        };
        assert_eq!(validate(&request), Err(Violation::OutOfBoundsRead));
    }

    #[test]
    fn strcompare_oob_before_null() {
        let short = Request::StrCompare {
            lhs: view(SRC, 8),
            rhs: view(0, 2),
            count: 4,
        };
        assert_eq!(validate(&short), Err(Violation::OutOfBoundsRead));
        let in_bounds = Request::StrCompare {
            lhs: view(SRC, 8),
            rhs: view(0, 8),
            count: 4,
        };
        assert_eq!(validate(&in_bounds), Err(Violation::NullPointer));
    }

    #[test]
    fn fill_bounds() {
        let fits = Request::Fill {
            dst: view(DST, 8),
            count: 8,
        };
        let spills = Request::Fill {
            dst: view(DST, 8),
            count: 9,
        };
        assert_eq!(validate(&fits), Ok(Clearance::new(0, 8)));
        assert_eq!(validate(&spills), Err(Violation::overflow(9, 8)));
    }

    #[test]
    fn fill_overflow_before_null() {
        let spills = Request::Fill {
            dst: view(0, 2),
            count: 3,
        };
        assert_eq!(validate(&spills), Err(Violation::overflow(3, 2)));
        let zero = Request::Fill {
            dst: view(0, 2),
            count: 0,
        };
        assert_eq!(validate(&zero), Err(Violation::NullPointer));
    }

    #[test]
    fn wrap_detection() {
        assert_eq!(checked_add_lengths(1, 2), Some(3));
        assert_eq!(checked_add_lengths(usize::MAX, 0), Some(usize::MAX));
        assert_eq!(checked_add_lengths(usize::MAX, 1), None);
        assert_eq!(checked_add_lengths(usize::MAX / 2 + 1, usize::MAX / 2 + 1), None);
    }

    #[test]
    fn sizes_default_to_unsized() {
        assert_eq!(SizeReport::default(), SizeReport::Unsized);
    }
}
