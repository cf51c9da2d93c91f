//! Status code table: milestone names to ordinal codes to display text.
//!
//! A table is plain configuration data. It is built once, either from the
//! canonical accessioning steps ([`StatusCodeTable::standard`]), from a
//! [`StatusTableBuilder`], or from a [`TableConfig`], and then handed to a
//! resolver. Nothing here is global.
//!
//! # Invariants
//!
//! - at least one step exists; the first step is the *initial* step
//! - codes are unique, non-zero and strictly increasing in step order
//! - the *terminal* step is one of the steps
//! - code 0 always renders as the unknown-status text
//!
//! # Example
//!
//! ```rust
//! use milestone::table::{StatusCode, StatusCodeTable};
//!
//! let table = StatusCodeTable::standard();
//! assert_eq!(table.initial_step().name(), "registered");
//! assert_eq!(table.terminal_step().name(), "accessioned");
//! assert_eq!(table.code_for("deposited"), Some(StatusCode::new(5)));
//! assert_eq!(table.display_text_for(StatusCode::UNKNOWN), "Unknown Status");
//! ```

pub mod builder;
pub mod config;
pub mod error;

pub use builder::StatusTableBuilder;
pub use config::{StepConfig, TableConfig};
pub use error::{TableError, TableViolation};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display text used for code 0 unless configured otherwise.
pub const DEFAULT_UNKNOWN_TEXT: &str = "Unknown Status";

/// Terminal step name unless configured otherwise.
pub const DEFAULT_TERMINAL_STEP: &str = "accessioned";

/// Canonical accessioning steps: name, code, display text.
pub const STANDARD_STEPS: [(&str, u8, &str); 9] = [
    ("registered", 1, "Registered"),
    ("submitted", 2, "In accessioning"),
    ("described", 3, "In accessioning (described)"),
    ("published", 4, "In accessioning (described, published)"),
    ("deposited", 5, "In accessioning (described, published, deposited)"),
    ("accessioned", 6, "Accessioned"),
    ("indexed", 7, "Accessioned (indexed)"),
    ("shelved", 8, "Accessioned (indexed, ingested)"),
    ("opened", 9, "Opened"),
];

/// Ordinal lifecycle progress; 0 means no matching milestone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(u8);

impl StatusCode {
    pub const UNKNOWN: StatusCode = StatusCode(0);

    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One known milestone step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    name: String,
    code: StatusCode,
    display: String,
}

impl Step {
    pub(crate) fn new(name: impl Into<String>, code: StatusCode, display: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code,
            display: display.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

/// Validated mapping between milestone names, codes and display text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusCodeTable {
    steps: Vec<Step>,
    unknown_text: String,
    terminal: usize,
}

impl StatusCodeTable {
    /// Table of the canonical accessioning steps.
    pub fn standard() -> Self {
        let steps: Vec<Step> = STANDARD_STEPS
            .iter()
            .map(|(name, code, display)| Step::new(*name, StatusCode::new(*code), *display))
            .collect();
        let terminal = steps
            .iter()
            .position(|s| s.name == DEFAULT_TERMINAL_STEP)
            .unwrap_or(steps.len() - 1);
        Self {
            steps,
            unknown_text: DEFAULT_UNKNOWN_TEXT.to_string(),
            terminal,
        }
    }

    /// Start building a custom table.
    pub fn builder() -> StatusTableBuilder {
        StatusTableBuilder::new()
    }

    /// Assemble a table whose invariants the builder has already checked.
    pub(crate) fn from_validated(steps: Vec<Step>, unknown_text: String, terminal: usize) -> Self {
        Self {
            steps,
            unknown_text,
            terminal,
        }
    }

    /// Steps in progress order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// First step in progress order; only valid for version 1.
    pub fn initial_step(&self) -> &Step {
        // steps is non-empty by construction
        &self.steps[0]
    }

    /// Step whose presence decides a version's status outright.
    pub fn terminal_step(&self) -> &Step {
        &self.steps[self.terminal]
    }

    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.step(name).is_some()
    }

    pub fn code_for(&self, name: &str) -> Option<StatusCode> {
        self.step(name).map(Step::code)
    }

    pub fn unknown_text(&self) -> &str {
        &self.unknown_text
    }

    /// Display text for a code.
    ///
    /// Code 0 renders as the unknown-status text. Resolution only ever
    /// produces codes from this table; any other code also falls back to
    /// the unknown-status text.
    pub fn display_text_for(&self, code: StatusCode) -> &str {
        if code.is_unknown() {
            return &self.unknown_text;
        }
        match self.steps.iter().find(|s| s.code == code) {
            Some(step) => &step.display,
            None => {
                tracing::warn!(code = code.get(), "status code is not in the table");
                &self.unknown_text
            }
        }
    }
}

impl Default for StatusCodeTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_passes_validation() {
        let built = STANDARD_STEPS
            .iter()
            .fold(StatusTableBuilder::new(), |builder, (name, code, display)| {
                builder.step(*name, *code, *display)
            })
            .build()
            .unwrap();
        assert_eq!(built, StatusCodeTable::standard());
    }

    #[test]
    fn standard_table_codes() {
        let table = StatusCodeTable::standard();
        assert_eq!(table.code_for("registered"), Some(StatusCode::new(1)));
        assert_eq!(table.code_for("accessioned"), Some(StatusCode::new(6)));
        assert_eq!(table.code_for("opened"), Some(StatusCode::new(9)));
        assert_eq!(table.code_for("unheard-of"), None);
    }

    #[test]
    fn standard_table_display_text() {
        let table = StatusCodeTable::standard();
        assert_eq!(table.display_text_for(StatusCode::new(6)), "Accessioned");
        assert_eq!(
            table.display_text_for(StatusCode::new(8)),
            "Accessioned (indexed, ingested)"
        );
        assert_eq!(table.display_text_for(StatusCode::new(9)), "Opened");
    }

    #[test]
    fn mapping_is_injective() {
        let table = StatusCodeTable::standard();
        let mut codes: Vec<_> = table.steps().iter().map(Step::code).collect();
        codes.dedup();
        assert_eq!(codes.len(), table.steps().len());
        assert!(codes.iter().all(|c| !c.is_unknown()));
    }

    #[test]
    fn unknown_code_renders_unknown_text() {
        let table = StatusCodeTable::standard();
        assert_eq!(table.display_text_for(StatusCode::UNKNOWN), "Unknown Status");
        assert_eq!(table.display_text_for(StatusCode::new(42)), "Unknown Status");
    }

    #[test]
    fn initial_and_terminal_steps() {
        let table = StatusCodeTable::default();
        assert_eq!(table.initial_step().name(), "registered");
        assert_eq!(table.terminal_step().code(), StatusCode::new(6));
        assert!(table.is_known("shelved"));
        assert!(!table.is_known("Shelved"));
    }

    #[test]
    fn status_code_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&StatusCode::new(4)).unwrap(), "4");
    }
}
