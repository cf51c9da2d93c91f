//! A single named workflow for one object.

use super::error::WorkflowError;
use crate::core::{first_max_by_key, Process, ProcessStatus, Version};
use serde::{Deserialize, Serialize};

/// The process records of one workflow belonging to one object.
///
/// Built once from parsed records and read-only afterwards. All queries
/// that take a version match it exactly; an unversioned process never
/// matches a version query.
///
/// # Example
///
/// ```rust
/// use milestone::core::{Process, ProcessStatus, Version};
/// use milestone::workflow::WorkflowDocument;
///
/// let doc = WorkflowDocument::new(
///     "druid:bb123cd4567",
///     "accessionWF",
///     vec![
///         Process::new("start-accession", ProcessStatus::Completed)
///             .with_version(Version::new(2)),
///         Process::new("shelve", ProcessStatus::Waiting).with_version(Version::new(2)),
///     ],
/// )
/// .unwrap();
///
/// assert!(doc.active_for(Version::new(2)));
/// assert!(!doc.complete_for(Version::new(2)));
/// assert!(doc.complete_for(Version::new(3)));
/// assert_eq!(doc.incomplete_processes_for(Version::new(2))[0].name, "shelve");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRecord")]
pub struct WorkflowDocument {
    object_id: String,
    workflow_name: String,
    processes: Vec<Process>,
}

/// Wire shape of a document; checked by [`WorkflowDocument::new`] on the way in.
#[derive(Deserialize)]
struct DocumentRecord {
    object_id: String,
    workflow_name: String,
    #[serde(default)]
    processes: Vec<Process>,
}

impl TryFrom<DocumentRecord> for WorkflowDocument {
    type Error = WorkflowError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        Self::new(record.object_id, record.workflow_name, record.processes)
    }
}

impl WorkflowDocument {
    /// Build a document, rejecting records that lack identifying fields.
    pub fn new(
        object_id: impl Into<String>,
        workflow_name: impl Into<String>,
        processes: Vec<Process>,
    ) -> Result<Self, WorkflowError> {
        let object_id = object_id.into();
        let workflow_name = workflow_name.into();

        if object_id.trim().is_empty() {
            return Err(WorkflowError::MalformedInput(
                "workflow document has no object id".to_string(),
            ));
        }
        if workflow_name.trim().is_empty() {
            return Err(WorkflowError::MalformedInput(format!(
                "workflow document for {object_id} has no workflow name"
            )));
        }
        if let Some(position) = processes.iter().position(|p| p.name.trim().is_empty()) {
            return Err(WorkflowError::MalformedInput(format!(
                "process {position} of {workflow_name} for {object_id} has no name"
            )));
        }

        Ok(Self {
            object_id,
            workflow_name,
            processes,
        })
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn workflow_name(&self) -> &str {
        &self.workflow_name
    }

    /// All processes in document order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    fn processes_for(&self, version: Version) -> impl Iterator<Item = &Process> + '_ {
        self.processes.iter().filter(move |p| p.is_for(version))
    }

    /// Whether any process is tagged with exactly `version`.
    pub fn active_for(&self, version: Version) -> bool {
        self.processes_for(version).next().is_some()
    }

    /// Whether every process tagged `version` is completed or skipped.
    ///
    /// A version with no processes is complete.
    pub fn complete_for(&self, version: Version) -> bool {
        self.processes_for(version).all(|p| p.status.is_final())
    }

    /// Processes tagged `version` that still need work, in document order.
    pub fn incomplete_processes_for(&self, version: Version) -> Vec<&Process> {
        self.processes_for(version)
            .filter(|p| !p.status.is_final())
            .collect()
    }

    /// The named process with the highest version.
    ///
    /// Absent versions count as 0. Among records tied on the highest
    /// version, the first in document order is returned.
    pub fn process_for_recent_version(&self, name: &str) -> Option<&Process> {
        let named = self.processes.iter().filter(|p| p.name == name);
        first_max_by_key(named, |p| p.effective_version())
    }

    /// Status of the named process at its most recent version.
    pub fn status_of(&self, name: &str) -> Option<ProcessStatus> {
        self.process_for_recent_version(name).map(|p| p.status)
    }

    /// Highest explicit version carried by any process.
    pub fn latest_version(&self) -> Option<Version> {
        self.processes.iter().filter_map(|p| p.version).max()
    }

    /// [`complete_for`](Self::complete_for) at the latest version.
    pub fn complete(&self) -> bool {
        self.latest_version()
            .map_or(true, |version| self.complete_for(version))
    }

    /// [`incomplete_processes_for`](Self::incomplete_processes_for) at the latest version.
    pub fn incomplete_processes(&self) -> Vec<&Process> {
        self.latest_version()
            .map(|version| self.incomplete_processes_for(version))
            .unwrap_or_default()
    }
}
