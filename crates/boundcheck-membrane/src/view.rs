//! Caller-declared buffer regions.

/// A region of caller-owned memory an operation is allowed to touch.
///
/// `addr == 0` models an absent (null) buffer. `capacity` is trusted as
/// declared; the engine never infers it from buffer contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferView {
    /// Base address of the region.
    pub addr: usize,
    /// Number of bytes that may be read or written starting at `addr`.
    pub capacity: usize,
}

impl BufferView {
    /// Create a view from a raw address and a declared capacity.
    #[must_use]
    pub const fn new(addr: usize, capacity: usize) -> Self {
        Self { addr, capacity }
    }

    /// A view with no declared readable extent.
    ///
    /// Used for C source arguments of the single-bound copy family, where the
    /// caller only declares the destination size.
    #[must_use]
    pub const fn unbounded(addr: usize) -> Self {
        Self {
            addr,
            capacity: usize::MAX,
        }
    }

    /// A view covering exactly the bytes of `bytes`.
    #[must_use]
    pub fn of_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.as_ptr().addr(), bytes.len())
    }

    /// Returns true if the view has no backing address.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.addr == 0
    }

    /// Returns true if the view declares a finite capacity.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.capacity != usize::MAX
    }
}
