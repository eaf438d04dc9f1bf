use crate::records::row::RowId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A row rewritten to its canonical timezone and confirmed by read-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixed {
    pub id: RowId,
    pub from: String,
    pub to: String,
}

/// Why a single row could not be remediated. Never fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixFailure {
    #[error("no mapping")]
    NoMapping,

    /// The update ran but the stored value did not read back as expected.
    #[error("verify mismatch (expected '{expected}', found {found:?})")]
    VerifyMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("database error: {message}")]
    Database { message: String },
}

impl FixFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            FixFailure::NoMapping => "no mapping",
            FixFailure::VerifyMismatch { .. } => "verify mismatch",
            FixFailure::Database { .. } => "database error",
        }
    }
}

pub type FixOutcome = Result<Fixed, FixFailure>;
