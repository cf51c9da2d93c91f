//! Status Report
//!
//! This example builds the records for one object by hand and reports
//! what a repository dashboard would show for each version.
//!
//! Key concepts:
//! - Version-scoped workflow queries (active, complete, errors)
//! - Milestone timelines resolved into a single status per version
//! - Custom status tables validated with all violations reported at once
//!
//! Run with: cargo run --example status_report

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use milestone::core::{Milestone, MilestoneTimeline, Process, ProcessStatus, Version};
use milestone::status::StatusResolver;
use milestone::table::{StatusCodeTable, TableConfig};
use milestone::workflow::{WorkflowCollection, WorkflowDocument};

const DRUID: &str = "druid:gv054hp4128";

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2013, month, day, hour, 10, 56).unwrap()
}

fn workflows() -> Result<WorkflowCollection, Box<dyn std::error::Error>> {
    let v1 = Version::new(1);
    let v2 = Version::new(2);

    let accession = WorkflowDocument::new(
        DRUID,
        "accessionWF",
        vec![
            Process::new("start-accession", ProcessStatus::Completed).with_version(v1),
            Process::new("shelve", ProcessStatus::Completed).with_version(v1),
            Process::new("start-accession", ProcessStatus::Completed).with_version(v2),
            Process::new("shelve", ProcessStatus::Error)
                .with_version(v2)
                .with_attempts(3)
                .with_error_message("Unable to reach storage root"),
            Process::new("end-accession", ProcessStatus::Waiting).with_version(v2),
        ],
    )?;
    let versioning = WorkflowDocument::new(
        DRUID,
        "versioningWF",
        vec![
            Process::new("start-version", ProcessStatus::Completed).with_version(v2),
            Process::new("submit-version", ProcessStatus::Skipped).with_version(v2),
        ],
    )?;

    Ok(WorkflowCollection::new(DRUID, vec![accession, versioning])?)
}

fn timeline() -> MilestoneTimeline {
    MilestoneTimeline::new(DRUID, Vec::new())
        .record(Milestone::new("registered", at(8, 30, 9)))
        .record(Milestone::new("submitted", at(9, 1, 10)).with_version(Version::new(1)))
        .record(Milestone::new("accessioned", at(9, 1, 12)).with_version(Version::new(1)))
        .record(Milestone::new("shelved", at(9, 2, 8)).with_version(Version::new(1)))
        .record(Milestone::new("opened", at(10, 1, 15)).with_version(Version::new(2)))
        .record(Milestone::new("described", at(10, 2, 11)).with_version(Version::new(2)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Status Report for {DRUID} ===\n");

    println!("Example 1: Workflow Queries");
    let workflows = workflows()?;
    for version in [Version::new(1), Version::new(2), Version::new(3)] {
        println!("  Version {version}:");
        for doc in workflows.workflows() {
            let pending: Vec<&str> = doc
                .incomplete_processes_for(version)
                .into_iter()
                .map(|p| p.name.as_str())
                .collect();
            println!(
                "    {:<14} active={:<5} complete={:<5} pending={:?}",
                doc.workflow_name(),
                doc.active_for(version),
                doc.complete_for(version),
                pending
            );
        }
        for message in workflows.errors_for(version) {
            println!("    error: {message}");
        }
    }
    println!();

    println!("Example 2: Object Status");
    let timeline = timeline();
    let pacific = FixedOffset::west_opt(7 * 3600).ok_or("offset out of range")?;
    let resolver = StatusResolver::new(StatusCodeTable::standard()).with_display_offset(pacific);
    for version in [Version::new(1), Version::new(2), Version::new(3)] {
        let status = resolver.status_for(&timeline, version);
        println!(
            "  {:<50} simplified: {}",
            status.display(true),
            status.display_simplified()
        );
    }
    println!();

    println!("Example 3: Configured Table");
    let config = TableConfig::from_json_str(
        r#"{
            "steps": [
                {"name": "received", "code": 1, "display": "Received"},
                {"name": "cataloged", "code": 2, "display": "Cataloged"},
                {"name": "released", "code": 3, "display": "Released"}
            ],
            "terminal_step": "released"
        }"#,
    )?;
    let custom = StatusResolver::from_config(&config)?;
    let released = MilestoneTimeline::new(
        DRUID,
        vec![
            Milestone::new("cataloged", at(11, 2, 9)),
            Milestone::new("released", at(11, 1, 9)),
        ],
    );
    println!("  {}", custom.status_for(&released, Version::new(1)));
    println!();

    println!("Example 4: Rejected Table");
    let rejected = StatusCodeTable::builder()
        .step("received", 0, "Received")
        .step("received", 2, "")
        .terminal("released")
        .build();
    if let Err(err) = rejected {
        println!("  {} violations reported together:", err.violations().len());
        for violation in err.violations() {
            println!("    - {violation}");
        }
    }

    println!("\n=== Report Complete ===");
    Ok(())
}
