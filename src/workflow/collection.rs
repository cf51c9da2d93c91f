//! All workflows recorded for one object.

use super::document::WorkflowDocument;
use super::error::WorkflowError;
use crate::core::Version;
use serde::{Deserialize, Serialize};

/// Ordered workflows for one object.
///
/// Insertion order is preserved and workflow names are not deduplicated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CollectionRecord")]
pub struct WorkflowCollection {
    object_id: String,
    workflows: Vec<WorkflowDocument>,
}

#[derive(Deserialize)]
struct CollectionRecord {
    object_id: String,
    #[serde(default)]
    workflows: Vec<WorkflowDocument>,
}

impl TryFrom<CollectionRecord> for WorkflowCollection {
    type Error = WorkflowError;

    fn try_from(record: CollectionRecord) -> Result<Self, Self::Error> {
        Self::new(record.object_id, record.workflows)
    }
}

impl WorkflowCollection {
    /// Build a collection; every document must belong to `object_id`.
    pub fn new(
        object_id: impl Into<String>,
        workflows: Vec<WorkflowDocument>,
    ) -> Result<Self, WorkflowError> {
        let object_id = object_id.into();
        if object_id.trim().is_empty() {
            return Err(WorkflowError::MalformedInput(
                "workflow collection has no object id".to_string(),
            ));
        }
        if let Some(stray) = workflows.iter().find(|w| w.object_id() != object_id) {
            return Err(WorkflowError::MalformedInput(format!(
                "workflow {} belongs to {}, not {}",
                stray.workflow_name(),
                stray.object_id(),
                object_id
            )));
        }
        Ok(Self {
            object_id,
            workflows,
        })
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn workflows(&self) -> &[WorkflowDocument] {
        &self.workflows
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// Workflow names in collection order.
    pub fn workflow_names(&self) -> Vec<&str> {
        self.workflows.iter().map(|w| w.workflow_name()).collect()
    }

    /// First workflow with the given name.
    pub fn workflow(&self, name: &str) -> Option<&WorkflowDocument> {
        self.workflows.iter().find(|w| w.workflow_name() == name)
    }

    /// Error messages of every errored process tagged `version`.
    ///
    /// Messages are concatenated workflow by workflow, each in document
    /// order. Errored processes without a message contribute nothing.
    pub fn errors_for(&self, version: Version) -> Vec<&str> {
        self.workflows
            .iter()
            .flat_map(|w| w.processes())
            .filter(|p| p.status.is_error() && p.is_for(version))
            .filter_map(|p| p.error_message.as_deref())
            .collect()
    }
}
