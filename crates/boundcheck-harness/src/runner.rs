//! Test execution engine.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::diff;
use crate::error::HarnessError;
use crate::execute::execute_case;
use crate::fixtures::{FixtureCase, FixtureSet, Mode};
use crate::verify::{OutcomeClass, VerificationResult};

/// Prefix of the diagnostic line an aborting wrapper writes to stderr.
pub const DIAGNOSTIC_PREFIX: &str = "[err] ";

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Executable that understands `run-abort-case`.
    child: Option<PathBuf>,
}

impl TestRunner {
    /// Create a runner that can only execute error-family cases.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            child: None,
        }
    }

    /// Run abort-family cases through `executable run-abort-case`.
    #[must_use]
    pub fn with_child_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.child = Some(executable.into());
        self
    }

    /// Run all fixtures in a set loaded from `fixture_path`.
    pub fn run(&self, fixture_set: &FixtureSet, fixture_path: &Path) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| {
                let actual = self
                    .outcome(case, fixture_path)
                    .unwrap_or_else(|err| format!("unsupported:{err}"));
                let passed = actual == case.expected_output;
                VerificationResult {
                    case_name: case.name.clone(),
                    symbol: case.symbol(),
                    mode: case.mode,
                    outcome: OutcomeClass::classify(&actual),
                    passed,
                    expected: case.expected_output.clone(),
                    diff: (!passed).then(|| diff::render_diff(&case.expected_output, &actual)),
                    actual,
                }
            })
            .collect()
    }

    fn outcome(&self, case: &FixtureCase, fixture_path: &Path) -> Result<String, HarnessError> {
        match case.mode {
            Mode::Try => execute_case(case),
            Mode::Abort => {
                let child = self
                    .child
                    .as_ref()
                    .ok_or_else(|| HarnessError::NoChildExecutable(case.name.clone()))?;
                let output = Command::new(child)
                    .arg("run-abort-case")
                    .arg("--fixture")
                    .arg(fixture_path)
                    .arg("--case")
                    .arg(&case.name)
                    .output()?;
                Ok(classify_child(&output))
            }
        }
    }
}

/// Render a child's result: its stdout on success, `abort:<line>` when it
/// died after printing a diagnostic, `failed:<status>` otherwise.
#[must_use]
pub fn classify_child(output: &Output) -> String {
    if output.status.success() {
        return String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    match stderr.lines().find(|l| l.starts_with(DIAGNOSTIC_PREFIX)) {
        Some(line) => format!("abort:{line}"),
        None => format!("failed:{}", output.status),
    }
}
