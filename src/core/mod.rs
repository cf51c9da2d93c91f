//! Record types shared by the workflow and status layers.
//!
//! This module holds the parsed-record shapes handed over by a transport
//! collaborator:
//! - `Process` records with their `ProcessStatus`
//! - `Milestone` events collected in a `MilestoneTimeline`
//! - numeric `Version`s
//!
//! Everything here is immutable once built and every function is pure.

pub mod error;
mod milestone;
mod process;
mod selection;
mod version;

pub use error::RecordError;
pub use milestone::{Milestone, MilestoneTimeline};
pub use process::{Process, ProcessStatus};
pub use selection::first_max_by_key;
pub use version::Version;
