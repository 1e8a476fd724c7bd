//! Harness error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    #[error("no case named `{0}`")]
    UnknownCase(String),
    #[error("case `{case}`: {reason}")]
    MalformedFixture { case: String, reason: String },
    #[error("abort-mode case `{0}` needs a child executable")]
    NoChildExecutable(String),
}
