//! Version-scoped queries over an object's workflows.
//!
//! A [`WorkflowDocument`] holds the processes of one named workflow;
//! a [`WorkflowCollection`] holds every workflow of one object and answers
//! cross-workflow questions such as which processes errored for a version.

mod collection;
mod document;
pub mod error;

pub use collection::WorkflowCollection;
pub use document::WorkflowDocument;
pub use error::WorkflowError;
