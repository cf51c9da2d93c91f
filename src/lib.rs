//! Milestone: a pure workflow status engine
//!
//! Milestone answers two questions about a digital object from records that
//! a transport layer has already fetched and parsed:
//!
//! - which workflow processes are active, complete, or failing for a
//!   given object version
//! - what single human-facing status an object version has, given an
//!   unordered set of timestamped lifecycle milestones
//!
//! The engine does no I/O and holds no global state. Every value is built
//! once and then only read, so independent objects can be evaluated
//! concurrently without coordination.
//!
//! # Core Concepts
//!
//! - **Process / WorkflowDocument / WorkflowCollection**: version-scoped
//!   structural queries over workflow steps
//! - **Milestone / MilestoneTimeline**: lifecycle events for one object
//! - **StatusCodeTable**: injected mapping of milestone names to ordinal
//!   codes and display text
//! - **StatusResolver**: the status rules: version scoping, the terminal
//!   step short-circuit, and first-recorded tie-breaking
//!
//! # Example
//!
//! ```rust
//! use milestone::core::{Milestone, MilestoneTimeline, Process, ProcessStatus, Version};
//! use milestone::status::StatusResolver;
//! use milestone::table::StatusCodeTable;
//! use milestone::workflow::{WorkflowCollection, WorkflowDocument};
//! use chrono::{TimeZone, Utc};
//!
//! let druid = "druid:bb123cd4567";
//! let v2 = Version::new(2);
//!
//! let accession = WorkflowDocument::new(
//!     druid,
//!     "accessionWF",
//!     vec![
//!         Process::new("start-accession", ProcessStatus::Completed).with_version(v2),
//!         Process::new("shelve", ProcessStatus::Error)
//!             .with_version(v2)
//!             .with_error_message("storage root unavailable"),
//!     ],
//! )?;
//! let workflows = WorkflowCollection::new(druid, vec![accession])?;
//! assert_eq!(workflows.errors_for(v2), vec!["storage root unavailable"]);
//!
//! let timeline = MilestoneTimeline::new(
//!     druid,
//!     vec![Milestone::new("submitted", Utc.with_ymd_and_hms(2013, 9, 1, 12, 0, 0).unwrap())
//!         .with_version(v2)],
//! );
//! let resolver = StatusResolver::new(StatusCodeTable::standard());
//! assert_eq!(resolver.status_for(&timeline, v2).display(false), "v2 In accessioning");
//! # Ok::<(), milestone::workflow::WorkflowError>(())
//! ```

pub mod core;
pub mod status;
pub mod table;
pub mod workflow;

// Re-export commonly used types
pub use crate::core::{
    Milestone, MilestoneTimeline, Process, ProcessStatus, RecordError, Version,
};
pub use status::{ObjectStatus, StatusInfo, StatusResolver};
pub use table::{StatusCode, StatusCodeTable, StatusTableBuilder};
pub use workflow::{WorkflowCollection, WorkflowDocument, WorkflowError};
