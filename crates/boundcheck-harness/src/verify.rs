//! Output comparison and verification.

use serde::{Deserialize, Serialize};

use crate::fixtures::Mode;

/// How a wrapper call ended, read back from its rendered outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    /// The call was cleared and performed.
    Completed,
    /// The error family returned this code.
    Rejected(i32),
    /// The abort family terminated with a diagnostic line.
    Aborted,
    /// The case could not be run, or the child died without a diagnostic.
    Broken,
}

impl OutcomeClass {
    /// Classify a canonical outcome string produced by the runner.
    #[must_use]
    pub fn classify(rendered: &str) -> Self {
        if let Some(code) = rendered.strip_prefix("err:") {
            return code.parse().map_or(Self::Broken, Self::Rejected);
        }
        if rendered.starts_with("abort:") {
            return Self::Aborted;
        }
        if rendered.starts_with("unsupported:") || rendered.starts_with("failed:") {
            return Self::Broken;
        }
        Self::Completed
    }

    /// Short label for reports.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Completed => "completed".to_string(),
            Self::Rejected(code) => format!("rejected {code}"),
            Self::Aborted => "aborted".to_string(),
            Self::Broken => "broken".to_string(),
        }
    }
}

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the test case.
    pub case_name: String,
    /// Wrapper exercised, e.g. `checked_strcat`.
    pub symbol: String,
    /// Family the wrapper belongs to.
    pub mode: Mode,
    /// How the call actually ended.
    pub outcome: OutcomeClass,
    /// Whether the case passed.
    pub passed: bool,
    /// Expected output.
    pub expected: String,
    /// Actual output.
    pub actual: String,
    /// Diff if the case failed.
    pub diff: Option<String>,
}

impl VerificationResult {
    /// True when the outcome kind differs from the expected one, e.g. a
    /// case expected to be rejected that completed instead.
    #[must_use]
    pub fn verdict_flipped(&self) -> bool {
        !self.passed
            && std::mem::discriminant(&OutcomeClass::classify(&self.expected))
                != std::mem::discriminant(&self.outcome)
    }
}

/// Pass counts for one wrapper family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTally {
    /// Cases run.
    pub total: usize,
    /// Cases passed.
    pub passed: usize,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Total cases run.
    pub total: usize,
    /// Cases passed.
    pub passed: usize,
    /// Cases failed.
    pub failed: usize,
    /// Abort-family (`checked_*`) cases.
    pub abort_family: FamilyTally,
    /// Error-family (`try_checked_*`) cases.
    pub try_family: FamilyTally,
    /// Individual results.
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        let mut abort_family = FamilyTally::default();
        let mut try_family = FamilyTally::default();
        for r in &results {
            let tally = match r.mode {
                Mode::Abort => &mut abort_family,
                Mode::Try => &mut try_family,
            };
            tally.total += 1;
            tally.passed += usize::from(r.passed);
        }
        Self {
            total,
            passed,
            failed,
            abort_family,
            try_family,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
