//! Status table configuration loaded from JSON.
//!
//! Values not present in the document take defaults. An empty (or missing)
//! `steps` list means the canonical accessioning steps.

use super::builder::StatusTableBuilder;
use super::error::TableError;
use super::{StatusCodeTable, DEFAULT_TERMINAL_STEP, DEFAULT_UNKNOWN_TEXT, STANDARD_STEPS};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// One step entry in a table config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConfig {
    pub name: String,
    pub code: u8,
    pub display: String,
}

/// Serializable description of a status table and how it renders times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub steps: Vec<StepConfig>,

    #[serde(default = "default_unknown_text")]
    pub unknown_text: String,

    #[serde(default = "default_terminal_step")]
    pub terminal_step: String,

    /// Offset from UTC, in minutes, used when rendering status times.
    #[serde(default)]
    pub display_utc_offset_minutes: i32,
}

fn default_unknown_text() -> String {
    DEFAULT_UNKNOWN_TEXT.to_string()
}

fn default_terminal_step() -> String {
    DEFAULT_TERMINAL_STEP.to_string()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            unknown_text: default_unknown_text(),
            terminal_step: default_terminal_step(),
            display_utc_offset_minutes: 0,
        }
    }
}

impl TableConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the config and build its table.
    pub fn to_table(&self) -> Result<StatusCodeTable, TableError> {
        let builder = if self.steps.is_empty() {
            STANDARD_STEPS
                .iter()
                .fold(StatusTableBuilder::new(), |builder, (name, code, display)| {
                    builder.step(*name, *code, *display)
                })
        } else {
            self.steps
                .iter()
                .fold(StatusTableBuilder::new(), |builder, step| {
                    builder.step(step.name.clone(), step.code, step.display.clone())
                })
        };
        builder
            .unknown_text(self.unknown_text.clone())
            .terminal(self.terminal_step.clone())
            .build()
    }

    /// Offset used for rendering status times.
    pub fn display_offset(&self) -> Result<FixedOffset, TableError> {
        self.display_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(TableError::InvalidOffset(self.display_utc_offset_minutes))
    }
}
