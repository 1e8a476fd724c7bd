//! Fixture loading and management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Which wrapper family a case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// `checked_*`: violations terminate the process.
    Abort,
    /// `try_checked_*`: violations come back as a code.
    Try,
}

impl Mode {
    /// Symbol prefix for this family.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Abort => "checked_",
            Self::Try => "try_checked_",
        }
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier, unique within its set.
    pub name: String,
    /// Operation without family prefix (`memcpy`, `strcat`, ...).
    pub function: String,
    pub mode: Mode,
    /// `dst`, `src` (byte arrays or strings), `offset`, `count`, `value`.
    /// Missing keys read as empty / zero.
    pub inputs: serde_json::Value,
    /// Canonical rendering of the outcome (see [`crate::execute`]).
    pub expected_output: String,
}

impl FixtureCase {
    /// Full wrapper name, e.g. `try_checked_memcpy`.
    #[must_use]
    pub fn symbol(&self) -> String {
        format!("{}{}", self.mode.prefix(), self.function)
    }
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    #[serde(default)]
    pub description: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Look up a case by name.
    pub fn case(&self, name: &str) -> Result<&FixtureCase, HarnessError> {
        self.cases
            .iter()
            .find(|case| case.name == name)
            .ok_or_else(|| HarnessError::UnknownCase(name.to_string()))
    }
}

/// JSON fixture files directly under `dir`, sorted by path.
pub fn fixture_paths(dir: &Path) -> Result<Vec<std::path::PathBuf>, HarnessError> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}
