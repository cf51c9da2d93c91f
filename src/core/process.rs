//! Process records: one step instance inside a named workflow.
//!
//! Every attribute other than `name` and `status` is optional, and an
//! attribute that is present but empty (`Some(String::new())`) is kept
//! distinct from one that is absent.

use super::version::Version;
use super::error::RecordError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Status of a single process.
///
/// # Example
///
/// ```rust
/// use milestone::core::ProcessStatus;
///
/// let status: ProcessStatus = "skipped".parse().unwrap();
/// assert!(status.is_final());
/// assert!(!status.is_error());
/// assert_eq!(status.name(), "skipped");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Waiting,
    Completed,
    Error,
    Queued,
    Skipped,
    Started,
    Retrying,
    Hold,
}

impl ProcessStatus {
    /// All statuses, in declaration order.
    pub const ALL: [ProcessStatus; 8] = [
        Self::Waiting,
        Self::Completed,
        Self::Error,
        Self::Queued,
        Self::Skipped,
        Self::Started,
        Self::Retrying,
        Self::Hold,
    ];

    /// Wire name of the status.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Queued => "queued",
            Self::Skipped => "skipped",
            Self::Started => "started",
            Self::Retrying => "retrying",
            Self::Hold => "hold",
        }
    }

    /// Whether the process needs no further work (completed or skipped).
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl FromStr for ProcessStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecordError::MalformedInput(format!("unknown process status: {s:?}")))
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step instance within a workflow.
///
/// Several processes in a document may share a `name`; each retry or
/// object version produces its own record.
///
/// # Example
///
/// ```rust
/// use milestone::core::{Process, ProcessStatus, Version};
///
/// let process = Process::new("shelve", ProcessStatus::Error)
///     .with_version(Version::new(2))
///     .with_error_message("storage unavailable");
///
/// assert_eq!(process.version, Some(Version::new(2)));
/// assert_eq!(process.error_message.as_deref(), Some("storage unavailable"));
/// assert!(process.note.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub status: ProcessStatus,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Elapsed seconds.
    #[serde(default)]
    pub elapsed: Option<f64>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub lifecycle: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub lane_id: Option<String>,
    #[serde(default)]
    pub context: Option<BTreeMap<String, String>>,
    /// Absent means the process is unversioned.
    #[serde(default)]
    pub version: Option<Version>,
}

impl Process {
    /// Create a process with only a name and status set.
    pub fn new(name: impl Into<String>, status: ProcessStatus) -> Self {
        Self {
            name: name.into(),
            status,
            timestamp: None,
            elapsed: None,
            attempts: None,
            lifecycle: None,
            note: None,
            error_message: None,
            lane_id: None,
            context: None,
            version: None,
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_elapsed(mut self, seconds: f64) -> Self {
        self.elapsed = Some(seconds);
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: impl Into<String>) -> Self {
        self.lifecycle = Some(lifecycle.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_lane_id(mut self, lane_id: impl Into<String>) -> Self {
        self.lane_id = Some(lane_id.into());
        self
    }

    pub fn with_context(mut self, context: BTreeMap<String, String>) -> Self {
        self.context = Some(context);
        self
    }

    /// Version used for recency ordering; an absent version counts as 0.
    pub fn effective_version(&self) -> Version {
        self.version.unwrap_or(Version::new(0))
    }

    /// Whether the process is explicitly tagged with exactly `version`.
    pub fn is_for(&self, version: Version) -> bool {
        self.version == Some(version)
    }
}
