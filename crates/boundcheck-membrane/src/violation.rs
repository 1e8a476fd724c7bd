//! Violation taxonomy and the error-code contract.
//!
//! The `Display` form of a [`Violation`] is the `<reason>` fragment of the
//! abort diagnostic, so changing a message here changes the text written to
//! stderr by the abort family.

use std::fmt;

use thiserror::Error;

/// Destination/source too small, or offset outside the destination.
///
/// Numerically equal to `ERANGE` on Linux, but fixed here independently of
/// any platform header.
pub const ERR_POTENTIAL_BUFFER_OVERFLOW: i32 = 34;

/// Length arithmetic wrapped. Numerically equal to Linux `EOVERFLOW`.
pub const ERR_POTENTIAL_INTEGER_OVERFLOW: i32 = 75;

/// Success code of the error-returning family.
pub const SUCCESS: i32 = 0;

/// Stable nonzero codes returned by the error-returning family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Some buffer is too small or an offset is out of range.
    BufferOverflow = ERR_POTENTIAL_BUFFER_OVERFLOW,
    /// A length sum wrapped around.
    IntegerOverflow = ERR_POTENTIAL_INTEGER_OVERFLOW,
}

impl ErrorCode {
    /// The raw integer value handed across the C ABI.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Map a raw code back to its class. Returns `None` for `SUCCESS` and
    /// unknown values.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            ERR_POTENTIAL_BUFFER_OVERFLOW => Some(Self::BufferOverflow),
            ERR_POTENTIAL_INTEGER_OVERFLOW => Some(Self::IntegerOverflow),
            _ => None,
        }
    }
}

/// Optional sizes attached to a buffer-overflow report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeReport {
    /// The failing predicate has no single destination size to report.
    #[default]
    Unsized,
    /// `writing` bytes were requested against `destination` available bytes.
    Sized { writing: usize, destination: usize },
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsized => Ok(()),
            Self::Sized {
                writing,
                destination,
            } => write!(f, ", writing size {writing} to destination {destination}"),
        }
    }
}

/// A classified reason for refusing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Violation {
    /// A write would exceed the destination capacity.
    #[error("potential buffer overflow{sizes}")]
    BufferOverflow { sizes: SizeReport },
    /// A read would exceed a declared source capacity.
    #[error("potential buffer out-of-bounds read")]
    OutOfBoundsRead,
    /// Length arithmetic wrapped.
    #[error("potential integer overflow")]
    IntegerOverflow,
    /// A required buffer argument was absent.
    #[error("unexpected null pointer")]
    NullPointer,
}

impl Violation {
    /// Buffer overflow carrying the requested and available sizes.
    #[must_use]
    pub const fn overflow(writing: usize, destination: usize) -> Self {
        Self::BufferOverflow {
            sizes: SizeReport::Sized {
                writing,
                destination,
            },
        }
    }

    /// Buffer overflow without size details.
    #[must_use]
    pub const fn overflow_unsized() -> Self {
        Self::BufferOverflow {
            sizes: SizeReport::Unsized,
        }
    }

    /// Error-family code for this violation.
    ///
    /// Out-of-bounds reads and null pointers share the buffer-overflow code:
    /// the contract exposes only "too small / invalid" and "arithmetic wrapped".
    #[must_use]
    pub const fn code(self) -> ErrorCode {
        match self {
            Self::IntegerOverflow => ErrorCode::IntegerOverflow,
            Self::BufferOverflow { .. } | Self::OutOfBoundsRead | Self::NullPointer => {
                ErrorCode::BufferOverflow
            }
        }
    }

    /// Shorthand for `self.code().as_raw()`.
    #[must_use]
    pub const fn raw_code(self) -> i32 {
        self.code().as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::BufferOverflow.as_raw(), 34);
        assert_eq!(ErrorCode::IntegerOverflow.as_raw(), 75);
        assert_eq!(SUCCESS, 0);
    }

    #[test]
    fn raw_code_roundtrip() {
        assert_eq!(ErrorCode::from_raw(34), Some(ErrorCode::BufferOverflow));
        assert_eq!(ErrorCode::from_raw(75), Some(ErrorCode::IntegerOverflow));
        assert_eq!(ErrorCode::from_raw(0), None);
        assert_eq!(ErrorCode::from_raw(-1), None);
    }

    #[test]
    fn violation_classes_map_to_two_codes() {
        assert_eq!(Violation::overflow(10, 8).raw_code(), 34);
        assert_eq!(Violation::overflow_unsized().raw_code(), 34);
        assert_eq!(Violation::OutOfBoundsRead.raw_code(), 34);
        assert_eq!(Violation::NullPointer.raw_code(), 34);
        assert_eq!(Violation::IntegerOverflow.raw_code(), 75);
    }

    #[test]
    fn sized_overflow_message() {
        assert_eq!(
            Violation::overflow(10, 8).to_string(),
            "potential buffer overflow, writing size 10 to destination 8"
        );
    }

    #[test]
    fn unsized_messages() {
        assert_eq!(
            Violation::overflow_unsized().to_string(),
            "potential buffer overflow"
        );
        assert_eq!(
            Violation::OutOfBoundsRead.to_string(),
            "potential buffer out-of-bounds read"
        );
        assert_eq!(
            Violation::IntegerOverflow.to_string(),
            "potential integer overflow"
        );
        assert_eq!(Violation::NullPointer.to_string(), "unexpected null pointer");
    }
}
