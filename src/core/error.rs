//! Record parsing errors.

use thiserror::Error;

/// Errors from reading a single record field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Field text does not parse as the expected value
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}
