//! Status table errors.

use thiserror::Error;

/// A single problem found while validating a status table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("Table defines no steps")]
    NoSteps,

    #[error("Step '{step}' uses code 0, which is reserved for unknown status")]
    ReservedCode { step: String },

    #[error("Step '{step}' is defined more than once")]
    DuplicateStep { step: String },

    #[error("Code {code} is assigned to both '{first}' and '{second}'")]
    DuplicateCode {
        code: u8,
        first: String,
        second: String,
    },

    #[error("Step '{step}' has code {code}, not above the preceding code {previous}")]
    CodesNotIncreasing { step: String, code: u8, previous: u8 },

    #[error("Step '{step}' has no display text")]
    BlankDisplayText { step: String },

    #[error("Unknown-status display text is blank")]
    BlankUnknownText,

    #[error("Terminal step '{step}' is not one of the table's steps")]
    UnknownTerminalStep { step: String },
}

/// Errors that can occur when building or loading a status table.
#[derive(Debug, Error)]
pub enum TableError {
    /// Every violation found, in the order checks ran
    #[error("Invalid status table: {}", join_violations(.0))]
    Invalid(Vec<TableViolation>),

    /// Display offset does not fit in a UTC offset
    #[error("Display offset of {0} minutes is out of range")]
    InvalidOffset(i32),

    #[error("Failed to parse table config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TableError {
    /// Violations carried by an `Invalid` error; empty for other kinds.
    pub fn violations(&self) -> &[TableViolation] {
        match self {
            Self::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
