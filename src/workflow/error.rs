//! Workflow input errors.

use crate::core::RecordError;
use thiserror::Error;

/// Errors raised while turning parsed records into workflow values.
///
/// A query that simply finds nothing is never an error; it returns
/// `None` or an empty `Vec`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Input could not be reduced to the expected record shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl From<RecordError> for WorkflowError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MalformedInput(detail) => Self::MalformedInput(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Version;

    #[test]
    fn record_errors_surface_as_malformed_input() {
        let err: WorkflowError = "v2".parse::<Version>().unwrap_err().into();
        assert_eq!(
            err,
            WorkflowError::MalformedInput("version is not a number: \"v2\"".to_string())
        );
    }
}
