//! Builder API for creating status tables.
//!
//! `build` runs every check and reports all violations together instead of
//! stopping at the first one.

use super::error::{TableError, TableViolation};
use super::{Step, StatusCode, StatusCodeTable, DEFAULT_TERMINAL_STEP, DEFAULT_UNKNOWN_TEXT};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<TableViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> TableViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Builder for creating status tables.
///
/// # Example
///
/// ```rust
/// use milestone::table::{StatusCode, StatusTableBuilder};
///
/// let table = StatusTableBuilder::new()
///     .step("received", 1, "Received")
///     .step("cataloged", 2, "Cataloged")
///     .step("released", 3, "Released (public)")
///     .terminal("released")
///     .build()
///     .unwrap();
/// assert_eq!(table.code_for("cataloged"), Some(StatusCode::new(2)));
///
/// let err = StatusTableBuilder::new()
///     .step("received", 1, "Received")
///     .step("cataloged", 1, "Cataloged")
///     .terminal("released")
///     .build()
///     .unwrap_err();
/// assert_eq!(err.violations().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct StatusTableBuilder {
    steps: Vec<(String, u8, String)>,
    unknown_text: String,
    terminal: String,
}

impl StatusTableBuilder {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            unknown_text: DEFAULT_UNKNOWN_TEXT.to_string(),
            terminal: DEFAULT_TERMINAL_STEP.to_string(),
        }
    }

    /// Append a step; steps are ordered by insertion.
    pub fn step(mut self, name: impl Into<String>, code: u8, display: impl Into<String>) -> Self {
        self.steps.push((name.into(), code, display.into()));
        self
    }

    /// Set the display text for code 0
    pub fn unknown_text(mut self, text: impl Into<String>) -> Self {
        self.unknown_text = text.into();
        self
    }

    /// Set the step that short-circuits status resolution
    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.terminal = name.into();
        self
    }

    /// Validate and build the table.
    pub fn build(self) -> Result<StatusCodeTable, TableError> {
        let mut checks: Vec<Check> = Vec::new();

        checks.push(check(!self.steps.is_empty(), || TableViolation::NoSteps));
        checks.push(check(!self.unknown_text.trim().is_empty(), || {
            TableViolation::BlankUnknownText
        }));

        let mut seen_names: HashSet<&str> = HashSet::new();
        let mut seen_codes: HashMap<u8, &str> = HashMap::new();
        let mut previous: Option<u8> = None;

        for (name, code, display) in &self.steps {
            checks.push(check(*code != 0, || TableViolation::ReservedCode {
                step: name.clone(),
            }));
            checks.push(check(!display.trim().is_empty(), || {
                TableViolation::BlankDisplayText { step: name.clone() }
            }));
            checks.push(check(seen_names.insert(name.as_str()), || {
                TableViolation::DuplicateStep { step: name.clone() }
            }));

            let first_holder = seen_codes.get(code).map(|s| s.to_string());
            checks.push(check(first_holder.is_none(), || TableViolation::DuplicateCode {
                code: *code,
                first: first_holder.clone().unwrap_or_default(),
                second: name.clone(),
            }));
            seen_codes.entry(*code).or_insert(name.as_str());

            if let Some(prev) = previous {
                // equal codes are already reported as duplicates
                checks.push(check(*code >= prev, || TableViolation::CodesNotIncreasing {
                    step: name.clone(),
                    code: *code,
                    previous: prev,
                }));
            }
            previous = Some(*code);
        }

        let terminal = self.steps.iter().position(|(name, _, _)| *name == self.terminal);
        checks.push(check(terminal.is_some(), || TableViolation::UnknownTerminalStep {
            step: self.terminal.clone(),
        }));

        match Validation::all_vec(checks) {
            Validation::Success(_) => {
                let steps = self
                    .steps
                    .iter()
                    .map(|(name, code, display)| {
                        Step::new(name.clone(), StatusCode::new(*code), display.clone())
                    })
                    .collect();
                Ok(StatusCodeTable::from_validated(
                    steps,
                    self.unknown_text.clone(),
                    terminal.unwrap_or_default(),
                ))
            }
            Validation::Failure(errors) => {
                let violations: Vec<TableViolation> = errors.iter().cloned().collect();
                tracing::debug!(count = violations.len(), "status table rejected");
                Err(TableError::Invalid(violations))
            }
        }
    }
}

impl Default for StatusTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
