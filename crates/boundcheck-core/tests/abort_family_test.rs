//! Abort-family behavior, observed from a child process.
//!
//! Each scenario re-runs this test binary filtered to `abort_scenario_entry`
//! with `BOUNDCHECK_ABORT_SCENARIO` set. The child performs one call; the
//! parent checks the exit status and the exact stderr line.

use std::process::{Command, Output};

use boundcheck_core::diag::enforce;
use boundcheck_core::{
    checked_memcmp, checked_memcpy, checked_memcpy_offset, checked_memcpy_robust, checked_memset,
    checked_strcat, checked_strncmp,
};
use boundcheck_membrane::{BufferView, Request, validate};

const SCENARIO_ENV: &str = "BOUNDCHECK_ABORT_SCENARIO";

#[test]
fn abort_scenario_entry() {
    let Ok(scenario) = std::env::var(SCENARIO_ENV) else {
        return;
    };
    match scenario.as_str() {
        "memcpy_overflow" => {
            let mut dest = [0u8; 8];
            checked_memcpy(&mut dest, &[1u8; 10], 10);
        }
        "memcpy_fits" => {
            let mut dest = [0u8; 8];
            checked_memcpy(&mut dest, &[1u8; 8], 8);
        }
        "memcpy_offset_at_end" => {
            let mut dest = [0u8; 8];
            checked_memcpy_offset(&mut dest, 8, b"", 0);
        }
        "memcpy_offset_spills" => {
            let mut dest = [0u8; 8];
            checked_memcpy_offset(&mut dest, 6, b"abcd", 4);
        }
        "memcpy_robust_short_source" => {
            let mut dest = [0u8; 8];
            checked_memcpy_robust(&mut dest, b"ab", 4);
        }
        "strcat_no_room" => {
            let mut dest = *b"abc\0";
            checked_strcat(&mut dest, b"de");
        }
        "strcat_empty_destination" => {
            let mut dest: [u8; 0] = [];
            checked_strcat(&mut dest, b"xy");
        }
        "strcat_length_wrap" => {
            // Lengths this large only arrive through the C entry points.
            let request = Request::Concat {
                dst: BufferView::new(0x1000, 16),
                dst_len: usize::MAX - 1,
                src_len: 4,
            };
            enforce("checked_strcat", validate(&request));
        }
        "memcmp_over_read" => {
            let _ = checked_memcmp(b"abc", b"abcdef", 5);
        }
        "strncmp_over_read" => {
            let _ = checked_strncmp(b"abcdef", b"ab", 3);
        }
        "memset_overflow" => {
            let mut dest = [0u8; 4];
            checked_memset(&mut dest, 0, 5);
        }
        other => panic!("unknown scenario {other}"),
    }
}

fn run_scenario(name: &str) -> Output {
    let exe = std::env::current_exe().expect("test binary path");
    Command::new(exe)
        .args(["--exact", "abort_scenario_entry", "--test-threads=1"])
        .env(SCENARIO_ENV, name)
        .output()
        .expect("spawn scenario child")
}

fn assert_aborted_with(name: &str, expected_line: &str) {
    let output = run_scenario(name);
    assert!(
        !output.status.success(),
        "{name}: child exited successfully"
    );
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(
            output.status.signal(),
            Some(libc::SIGABRT),
            "{name}: expected SIGABRT, got {:?}",
            output.status
        );
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let expected = format!("{expected_line}\n");
    assert!(
        stderr.contains(&expected),
        "{name}: stderr was {stderr:?}, expected {expected:?}"
    );
}

#[test]
fn memcpy_overflow_aborts_with_sizes() {
    assert_aborted_with(
        "memcpy_overflow",
        "[err] Aborting due to potential buffer overflow, writing size 10 to destination 8 in: checked_memcpy",
    );
}

#[test]
fn memcpy_within_bounds_returns_normally() {
    let output = run_scenario("memcpy_fits");
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("[err]"));
}

#[test]
fn memcpy_offset_at_end_aborts_even_for_zero_count() {
    assert_aborted_with(
        "memcpy_offset_at_end",
        "[err] Aborting due to potential buffer overflow, writing size 0 to destination 0 in: checked_memcpy_offset",
    );
}

#[test]
fn memcpy_offset_spill_reports_remaining_capacity() {
    assert_aborted_with(
        "memcpy_offset_spills",
        "[err] Aborting due to potential buffer overflow, writing size 4 to destination 2 in: checked_memcpy_offset",
    );
}

#[test]
fn memcpy_robust_aborts_without_sizes() {
    assert_aborted_with(
        "memcpy_robust_short_source",
        "[err] Aborting due to potential buffer overflow in: checked_memcpy_robust",
    );
}

#[test]
fn strcat_reports_terminator_room() {
    assert_aborted_with(
        "strcat_no_room",
        "[err] Aborting due to potential buffer overflow, writing size 5 to destination 3 in: checked_strcat",
    );
}

#[test]
fn strcat_zero_capacity() {
    assert_aborted_with(
        "strcat_empty_destination",
        "[err] Aborting due to potential buffer overflow, writing size 2 to destination 0 in: checked_strcat",
    );
}

#[test]
fn strcat_length_wrap_aborts_as_integer_overflow() {
    assert_aborted_with(
        "strcat_length_wrap",
        "[err] Aborting due to potential integer overflow in: checked_strcat",
    );
}

#[test]
fn memcmp_over_read_aborts() {
    assert_aborted_with(
        "memcmp_over_read",
        "[err] Aborting due to potential buffer out-of-bounds read in: checked_memcmp",
    );
}

#[test]
fn strncmp_over_read_aborts() {
    assert_aborted_with(
        "strncmp_over_read",
        "[err] Aborting due to potential buffer out-of-bounds read in: checked_strncmp",
    );
}

#[test]
fn memset_overflow_aborts() {
    assert_aborted_with(
        "memset_overflow",
        "[err] Aborting due to potential buffer overflow, writing size 5 to destination 4 in: checked_memset",
    );
}
