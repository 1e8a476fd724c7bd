//! Fixture case execution against the core wrappers.
//!
//! Outcomes are rendered as canonical strings so fixtures can state them
//! directly:
//! - mutating operations: the destination after the call, `escape_ascii`
//!   encoded (`abc\x00\xaa`)
//! - comparisons: `less`, `equal` or `greater`
//! - error-family violations: `err:<code>`
//!
//! Abort-mode cases call the `checked_*` wrappers in the current process, so
//! a violating case terminates it. [`crate::runner`] runs them in a child.

use std::cmp::Ordering;

use boundcheck_core as bc;
use serde_json::Value;

use crate::error::HarnessError;
use crate::fixtures::{FixtureCase, Mode};

/// Operations a fixture may name.
pub const FUNCTIONS: [&str; 7] = [
    "memcpy",
    "memcpy_offset",
    "memcpy_robust",
    "strcat",
    "memcmp",
    "strncmp",
    "memset",
];

struct Inputs {
    dst: Vec<u8>,
    src: Vec<u8>,
    offset: usize,
    count: usize,
    value: u8,
}

impl Inputs {
    fn parse(case: &FixtureCase) -> Result<Self, HarnessError> {
        let value = number(case, "value")?;
        Ok(Self {
            dst: bytes(case, "dst")?,
            src: bytes(case, "src")?,
            offset: number(case, "offset")?,
            count: number(case, "count")?,
            value: u8::try_from(value)
                .map_err(|_| malformed(case, format!("`value` {value} does not fit in a byte")))?,
        })
    }
}

/// Execute `case` and render its outcome.
pub fn execute_case(case: &FixtureCase) -> Result<String, HarnessError> {
    if !FUNCTIONS.contains(&case.function.as_str()) {
        return Err(HarnessError::UnknownFunction(case.function.clone()));
    }
    let inputs = Inputs::parse(case)?;
    match case.mode {
        Mode::Try => run_try(&case.function, inputs),
        Mode::Abort => run_abort(&case.function, inputs),
    }
}

fn run_try(function: &str, mut io: Inputs) -> Result<String, HarnessError> {
    let verdict = match function {
        "memcpy" => bc::try_checked_memcpy(&mut io.dst, &io.src, io.count)
            .map(|()| render_bytes(&io.dst)),
        "memcpy_offset" => bc::try_checked_memcpy_offset(&mut io.dst, io.offset, &io.src, io.count)
            .map(|()| render_bytes(&io.dst)),
        "memcpy_robust" => bc::try_checked_memcpy_robust(&mut io.dst, &io.src, io.count)
            .map(|()| render_bytes(&io.dst)),
        "strcat" => bc::try_checked_strcat(&mut io.dst, &io.src).map(|()| render_bytes(&io.dst)),
        "memcmp" => bc::try_checked_memcmp(&io.dst, &io.src, io.count).map(render_ordering),
        "strncmp" => bc::try_checked_strncmp(&io.dst, &io.src, io.count).map(render_ordering),
        "memset" => bc::try_checked_memset(&mut io.dst, io.value, io.count)
            .map(|()| render_bytes(&io.dst)),
        other => return Err(HarnessError::UnknownFunction(other.to_string())),
    };
    Ok(match verdict {
        Ok(rendered) => rendered,
        Err(violation) => format!("err:{}", violation.raw_code()),
    })
}

fn run_abort(function: &str, mut io: Inputs) -> Result<String, HarnessError> {
    Ok(match function {
        "memcpy" => render_bytes(bc::checked_memcpy(&mut io.dst, &io.src, io.count)),
        "memcpy_offset" => render_bytes(bc::checked_memcpy_offset(
            &mut io.dst,
            io.offset,
            &io.src,
            io.count,
        )),
        "memcpy_robust" => render_bytes(bc::checked_memcpy_robust(&mut io.dst, &io.src, io.count)),
        "strcat" => render_bytes(bc::checked_strcat(&mut io.dst, &io.src)),
        "memcmp" => render_ordering(bc::checked_memcmp(&io.dst, &io.src, io.count)),
        "strncmp" => render_ordering(bc::checked_strncmp(&io.dst, &io.src, io.count)),
        "memset" => render_bytes(bc::checked_memset(&mut io.dst, io.value, io.count)),
        other => return Err(HarnessError::UnknownFunction(other.to_string())),
    })
}

fn render_bytes(bytes: &[u8]) -> String {
    bytes.escape_ascii().to_string()
}

fn render_ordering(ordering: Ordering) -> String {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
    .to_string()
}

fn malformed(case: &FixtureCase, reason: String) -> HarnessError {
    HarnessError::MalformedFixture {
        case: case.name.clone(),
        reason,
    }
}

fn bytes(case: &FixtureCase, key: &str) -> Result<Vec<u8>, HarnessError> {
    match case.inputs.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(text)) => Ok(text.as_bytes().to_vec()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .ok_or_else(|| malformed(case, format!("`{key}` must contain bytes")))
            })
            .collect(),
        Some(_) => Err(malformed(
            case,
            format!("`{key}` must be a string or byte array"),
        )),
    }
}

fn number(case: &FixtureCase, key: &str) -> Result<usize, HarnessError> {
    match case.inputs.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| malformed(case, format!("`{key}` must be a non-negative integer"))),
    }
}
