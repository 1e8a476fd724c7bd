//! Report generation for conformance results.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::HarnessError;
use crate::fixtures::FixtureSet;
use crate::verify::VerificationSummary;

/// Identity of a fixture file that fed a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDigest {
    pub path: String,
    pub family: String,
    pub cases: usize,
    /// Lowercase hex SHA-256 of the file bytes.
    pub sha256: String,
}

impl FixtureDigest {
    /// Read `path` and load its fixture set, recording the file digest.
    pub fn load(path: &Path) -> Result<(Self, FixtureSet), HarnessError> {
        let bytes = std::fs::read(path)?;
        let set: FixtureSet = serde_json::from_slice(&bytes)?;
        let digest = Self {
            path: path.display().to_string(),
            family: set.family.clone(),
            cases: set.cases.len(),
            sha256: sha256_hex(&bytes),
        };
        Ok((digest, set))
    }
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// A conformance report over one or more fixture files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    pub fixtures: Vec<FixtureDigest>,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n", self.summary.failed));
        out.push_str(&format!(
            "- checked_*: {}/{} passed\n",
            self.summary.abort_family.passed, self.summary.abort_family.total
        ));
        out.push_str(&format!(
            "- try_checked_*: {}/{} passed\n\n",
            self.summary.try_family.passed, self.summary.try_family.total
        ));

        out.push_str("## Fixtures\n\n");
        for f in &self.fixtures {
            out.push_str(&format!(
                "- `{}` ({}, {} cases) sha256 `{}`\n",
                f.path, f.family, f.cases, f.sha256
            ));
        }
        out.push('\n');

        out.push_str("| Case | Symbol | Outcome | Status |\n");
        out.push_str("|------|--------|---------|--------|\n");
        for r in &self.summary.results {
            let status = match (r.passed, r.verdict_flipped()) {
                (true, _) => "PASS",
                (false, true) => "FAIL (verdict)",
                (false, false) => "FAIL",
            };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                r.case_name,
                r.symbol,
                r.outcome.label(),
                status
            ));
        }

        let failures: Vec<_> = self.summary.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {}\n\n```diff\n", r.case_name));
                out.push_str(r.diff.as_deref().unwrap_or(""));
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
