//! Diagnostic reporter for the abort family.
//!
//! Formats `[err] Aborting due to <reason> in: <operation>` into a fixed
//! 128-byte stack buffer and hands it straight to `write(2)` on
//! `STDERR_FILENO`. Nothing here allocates, takes a lock or needs initialization,
//! so it stays usable from a process whose heap or stdio state is already
//! suspect. Write failures are ignored.

use std::fmt::{self, Write};

use boundcheck_membrane::Violation;

/// Total size of a diagnostic line, newline included.
pub const DIAGNOSTIC_CAPACITY: usize = 128;

// Last byte is reserved for the newline.
const BODY_CAPACITY: usize = DIAGNOSTIC_CAPACITY - 1;

// Longest operation name kept in full; the reason is cut to make room for it.
const OPERATION_CAPACITY: usize = 48;

const OPERATION_MARKER: &str = " in: ";

/// Fixed-capacity, truncating text buffer.
///
/// Writes past the body capacity are dropped silently; [`terminated`]
/// always has room for the trailing newline.
///
/// [`terminated`]: DiagnosticBuffer::terminated
pub struct DiagnosticBuffer {
    bytes: [u8; DIAGNOSTIC_CAPACITY],
    len: usize,
    limit: usize,
    truncated: bool,
}

impl DiagnosticBuffer {
    /// An empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; DIAGNOSTIC_CAPACITY],
            len: 0,
            limit: BODY_CAPACITY,
            truncated: false,
        }
    }

    /// Append as many bytes of `data` as fit.
    pub fn push_bytes(&mut self, data: &[u8]) {
        let room = self.limit.saturating_sub(self.len);
        let take = data.len().min(room);
        self.bytes[self.len..self.len + take].copy_from_slice(&data[..take]);
        self.len += take;
        if take < data.len() {
            self.truncated = true;
        }
    }

    /// Text written so far, without the newline.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Returns true if any input was dropped.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The finished line: body plus `\n`.
    pub fn terminated(&mut self) -> &[u8] {
        self.bytes[self.len] = b'\n';
        &self.bytes[..=self.len]
    }
}

impl Default for DiagnosticBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for DiagnosticBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

/// Format the diagnostic for `violation` raised by operation `op`.
///
/// The line always ends with ` in: <op>`. When it does not fit, the reason
/// is cut first; only names longer than 48 bytes are themselves cut.
#[must_use]
pub fn format_diagnostic(op: &str, violation: &Violation) -> DiagnosticBuffer {
    let name = &op.as_bytes()[..op.len().min(OPERATION_CAPACITY)];
    let mut buf = DiagnosticBuffer::new();
    buf.limit = BODY_CAPACITY - OPERATION_MARKER.len() - name.len();
    // DiagnosticBuffer::write_str never fails.
    let _ = write!(buf, "[err] Aborting due to {violation}");
    buf.limit = BODY_CAPACITY;
    buf.push_bytes(OPERATION_MARKER.as_bytes());
    buf.push_bytes(name);
    if name.len() < op.len() {
        buf.truncated = true;
    }
    buf
}

/// Write the diagnostic line for `violation` to stderr.
pub fn report(op: &str, violation: &Violation) {
    #[cfg(feature = "diagnostics")]
    {
        let mut buf = format_diagnostic(op, violation);
        write_stderr(buf.terminated());
    }
    #[cfg(not(feature = "diagnostics"))]
    {
        let _ = (op, violation);
    }
}

/// Report `violation` and terminate the process abnormally.
#[cold]
#[inline(never)]
pub fn fatal(op: &str, violation: Violation) -> ! {
    report(op, &violation);
    std::process::abort()
}

/// Unwrap a validation verdict, terminating the process on violation.
#[inline]
pub fn enforce<T>(op: &str, verdict: Result<T, Violation>) -> T {
    match verdict {
        Ok(value) => value,
        Err(violation) => fatal(op, violation),
    }
}

#[cfg(unix)]
#[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
fn write_stderr(mut bytes: &[u8]) {
    while !bytes.is_empty() {
        // SAFETY: `bytes` is a live slice; write(2) reads at most `bytes.len()` bytes from it.
        let written =
            unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        if written <= 0 {
            return;
        }
        bytes = &bytes[written as usize..];
    }
}

#[cfg(not(unix))]
#[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
fn write_stderr(bytes: &[u8]) {
    use std::io::Write as _;
    let _ = std::io::stderr().write_all(bytes);
}
