//! Milestone-driven status resolution.
//!
//! Resolution is three steps over a timeline and a target version:
//!
//! 1. keep the *current* milestones: known to the table, not the initial
//!    step when the version is above 1, and either untagged or tagged with
//!    exactly the target version
//! 2. if any current milestone is the terminal step, the status is the
//!    terminal step at its latest time, whatever else was recorded
//! 3. otherwise the latest current milestone decides; with none the status
//!    is unknown (code 0)
//!
//! Ties on time go to the milestone recorded first.

use super::display::{format_status_time, simplify_display_text};
use crate::core::{first_max_by_key, Milestone, MilestoneTimeline, Version};
use crate::table::{StatusCode, StatusCodeTable, TableConfig, TableError};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of resolving one object version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub version: Version,
    pub code: StatusCode,
    pub time: Option<DateTime<Utc>>,
}

impl StatusInfo {
    fn unknown(version: Version) -> Self {
        Self {
            version,
            code: StatusCode::UNKNOWN,
            time: None,
        }
    }
}

/// Resolves object statuses against an injected status table.
///
/// A resolver holds no per-object state and can be shared freely across
/// threads.
///
/// # Example
///
/// ```rust
/// use milestone::core::{Milestone, MilestoneTimeline, Version};
/// use milestone::status::StatusResolver;
/// use milestone::table::StatusCodeTable;
/// use chrono::{TimeZone, Utc};
///
/// let resolver = StatusResolver::new(StatusCodeTable::standard());
/// let timeline = MilestoneTimeline::new(
///     "druid:bb123cd4567",
///     vec![
///         Milestone::new("accessioned", Utc.with_ymd_and_hms(2013, 9, 1, 12, 10, 56).unwrap())
///             .with_version(Version::new(2)),
///         Milestone::new("deposited", Utc.with_ymd_and_hms(2013, 10, 1, 12, 10, 56).unwrap())
///             .with_version(Version::new(2)),
///     ],
/// );
///
/// let status = resolver.status_for(&timeline, Version::new(2));
/// assert_eq!(status.display(false), "v2 Accessioned");
/// assert_eq!(status.display(true), "v2 Accessioned 2013-09-01 12:10PM");
/// assert_eq!(status.display_simplified(), "Accessioned");
/// ```
#[derive(Clone, Debug)]
pub struct StatusResolver {
    table: StatusCodeTable,
    display_offset: FixedOffset,
}

impl StatusResolver {
    /// Create a resolver that renders times in UTC.
    pub fn new(table: StatusCodeTable) -> Self {
        Self {
            table,
            display_offset: Utc.fix(),
        }
    }

    /// Render status times in `offset` instead of UTC.
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    /// Build a resolver from a validated table config.
    pub fn from_config(config: &TableConfig) -> Result<Self, TableError> {
        let table = config.to_table()?;
        let offset = config.display_offset()?;
        Ok(Self::new(table).with_display_offset(offset))
    }

    pub fn table(&self) -> &StatusCodeTable {
        &self.table
    }

    pub fn display_offset(&self) -> FixedOffset {
        self.display_offset
    }

    fn is_current(&self, milestone: &Milestone, version: Version) -> bool {
        if !self.table.is_known(&milestone.name) {
            tracing::trace!(milestone = %milestone.name, "dropping unknown milestone");
            return false;
        }
        if version > Version::FIRST && milestone.name == self.table.initial_step().name() {
            tracing::trace!(
                milestone = %milestone.name,
                %version,
                "dropping initial milestone for later version"
            );
            return false;
        }
        match milestone.version {
            None => true,
            Some(tagged) => tagged == version,
        }
    }

    /// Milestones that count toward `version`, in timeline order.
    pub fn current_milestones<'t>(
        &self,
        timeline: &'t MilestoneTimeline,
        version: Version,
    ) -> Vec<&'t Milestone> {
        timeline
            .iter()
            .filter(|m| self.is_current(m, version))
            .collect()
    }

    /// Resolve the status of one object version.
    pub fn resolve(&self, timeline: &MilestoneTimeline, version: Version) -> StatusInfo {
        let current = self.current_milestones(timeline, version);
        let terminal = self.table.terminal_step();

        let terminal_hits = current.iter().copied().filter(|m| m.name == terminal.name());
        if let Some(reached) = first_max_by_key(terminal_hits, |m| m.timestamp) {
            tracing::debug!(
                object_id = timeline.object_id(),
                %version,
                code = terminal.code().get(),
                "terminal milestone decides status"
            );
            return StatusInfo {
                version,
                code: terminal.code(),
                time: Some(reached.timestamp),
            };
        }

        let info = match first_max_by_key(current.iter().copied(), |m| m.timestamp) {
            Some(latest) => StatusInfo {
                version,
                code: self
                    .table
                    .code_for(&latest.name)
                    .unwrap_or(StatusCode::UNKNOWN),
                time: Some(latest.timestamp),
            },
            None => StatusInfo::unknown(version),
        };
        tracing::debug!(
            object_id = timeline.object_id(),
            %version,
            code = info.code.get(),
            candidates = current.len(),
            "resolved status"
        );
        info
    }

    /// Resolve and bundle the result with this resolver for rendering.
    pub fn status_for(&self, timeline: &MilestoneTimeline, version: Version) -> ObjectStatus<'_> {
        ObjectStatus {
            resolver: self,
            info: self.resolve(timeline, version),
        }
    }

    /// Attach rendering to an already resolved status.
    pub fn render(&self, info: StatusInfo) -> ObjectStatus<'_> {
        ObjectStatus {
            resolver: self,
            info,
        }
    }
}

/// A resolved status together with the table that renders it.
#[derive(Clone, Debug)]
pub struct ObjectStatus<'r> {
    resolver: &'r StatusResolver,
    info: StatusInfo,
}

impl ObjectStatus<'_> {
    pub fn info(&self) -> &StatusInfo {
        &self.info
    }

    pub fn into_info(self) -> StatusInfo {
        self.info
    }

    pub fn version(&self) -> Version {
        self.info.version
    }

    pub fn code(&self) -> StatusCode {
        self.info.code
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.info.time
    }

    /// Display text of the status code.
    pub fn display_text(&self) -> &str {
        self.resolver.table.display_text_for(self.info.code)
    }

    /// `v{version} {text}`, with the formatted status time appended when
    /// `include_time` is set and a time exists.
    pub fn display(&self, include_time: bool) -> String {
        let mut rendered = format!("v{} {}", self.info.version, self.display_text());
        if let (true, Some(time)) = (include_time, self.info.time) {
            rendered.push(' ');
            rendered.push_str(&format_status_time(time, self.resolver.display_offset));
        }
        rendered
    }

    /// Display text without its trailing parenthetical.
    pub fn display_simplified(&self) -> String {
        simplify_display_text(self.display_text())
    }
}

impl fmt::Display for ObjectStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, month, day, 12, 10, 56).unwrap()
    }

    fn milestone(name: &str, at: DateTime<Utc>, version: Option<u32>) -> Milestone {
        let m = Milestone::new(name, at);
        match version {
            Some(v) => m.with_version(Version::new(v)),
            None => m,
        }
    }

    fn timeline(milestones: Vec<Milestone>) -> MilestoneTimeline {
        MilestoneTimeline::new("druid:bb123cd4567", milestones)
    }

    fn resolver() -> StatusResolver {
        StatusResolver::new(StatusCodeTable::standard())
    }

    #[test]
    fn accessioned_wins_over_later_milestone() {
        let tl = timeline(vec![
            milestone("accessioned", time(9, 1), Some(2)),
            milestone("deposited", time(10, 1), Some(2)),
        ]);
        let r = resolver();
        let status = r.status_for(&tl, Version::new(2));
        assert_eq!(status.code(), StatusCode::new(6));
        assert_eq!(status.time(), Some(time(9, 1)));
        assert_eq!(status.display(false), "v2 Accessioned");
    }

    #[test]
    fn accessioned_wins_identical_timestamp() {
        let tl = timeline(vec![
            milestone("deposited", time(10, 1), Some(2)),
            milestone("accessioned", time(10, 1), Some(2)),
        ]);
        let info = resolver().resolve(&tl, Version::new(2));
        assert_eq!(info.code, StatusCode::new(6));
        assert_eq!(info.time, Some(time(10, 1)));
    }

    #[test]
    fn accessioned_uses_latest_terminal_time() {
        let tl = timeline(vec![
            milestone("accessioned", time(9, 1), Some(1)),
            milestone("accessioned", time(9, 5), None),
            milestone("accessioned", time(9, 3), Some(1)),
        ]);
        let info = resolver().resolve(&tl, Version::new(1));
        assert_eq!(info.time, Some(time(9, 5)));
    }

    #[test]
    fn no_milestones_is_unknown() {
        let r = resolver();
        let status = r.status_for(&timeline(Vec::new()), Version::new(3));
        assert_eq!(status.code(), StatusCode::UNKNOWN);
        assert_eq!(status.time(), None);
        assert_eq!(status.display(true), "v3 Unknown Status");
    }

    #[test]
    fn other_versions_do_not_count() {
        let tl = timeline(vec![
            milestone("submitted", time(9, 1), Some(1)),
            milestone("deposited", time(9, 2), Some(1)),
        ]);
        let r = resolver();
        let status = r.status_for(&tl, Version::new(2));
        assert_eq!(status.display(false), "v2 Unknown Status");
    }

    #[test]
    fn registered_only_counts_for_first_version() {
        let tl = timeline(vec![milestone("registered", time(9, 1), None)]);
        let r = resolver();
        assert_eq!(r.resolve(&tl, Version::new(1)).code, StatusCode::new(1));
        assert_eq!(r.resolve(&tl, Version::new(2)).code, StatusCode::UNKNOWN);
        assert!(r.current_milestones(&tl, Version::new(2)).is_empty());
    }

    #[test]
    fn registered_dropped_even_when_tagged_with_later_version() {
        let tl = timeline(vec![
            milestone("registered", time(9, 9), Some(2)),
            milestone("opened", time(9, 1), Some(2)),
        ]);
        let info = resolver().resolve(&tl, Version::new(2));
        assert_eq!(info.code, StatusCode::new(9));
        assert_eq!(info.time, Some(time(9, 1)));
    }

    #[test]
    fn unknown_milestone_names_are_ignored() {
        let tl = timeline(vec![
            milestone("described", time(9, 1), Some(1)),
            milestone("reviewed-by-curator", time(9, 30), Some(1)),
        ]);
        let info = resolver().resolve(&tl, Version::new(1));
        assert_eq!(info.code, StatusCode::new(3));
    }

    #[test]
    fn untagged_milestones_apply_to_any_version() {
        let tl = timeline(vec![
            milestone("opened", time(9, 1), None),
            milestone("submitted", time(9, 2), None),
        ]);
        let r = resolver();
        let status = r.status_for(&tl, Version::new(4));
        assert_eq!(status.display(false), "v4 In accessioning");
    }

    #[test]
    fn latest_milestone_decides() {
        let tl = timeline(vec![
            milestone("submitted", time(9, 1), Some(1)),
            milestone("published", time(9, 3), Some(1)),
            milestone("described", time(9, 2), Some(1)),
        ]);
        let r = resolver();
        let status = r.status_for(&tl, Version::new(1));
        assert_eq!(status.code(), StatusCode::new(4));
        assert_eq!(status.display_simplified(), "In accessioning");
    }

    #[test]
    fn timestamp_tie_goes_to_first_recorded() {
        let tl = timeline(vec![
            milestone("described", time(9, 2), Some(1)),
            milestone("submitted", time(9, 2), Some(1)),
        ]);
        assert_eq!(
            resolver().resolve(&tl, Version::new(1)).code,
            StatusCode::new(3)
        );
    }

    #[test]
    fn current_milestones_keep_timeline_order() {
        let tl = timeline(vec![
            milestone("opened", time(9, 5), Some(2)),
            milestone("registered", time(9, 1), Some(1)),
            milestone("submitted", time(9, 6), None),
            milestone("mystery", time(9, 7), Some(2)),
        ]);
        let names: Vec<_> = resolver()
            .current_milestones(&tl, Version::new(2))
            .into_iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["opened", "submitted"]);
    }

    #[test]
    fn display_with_time_uses_offset() {
        let tl = timeline(vec![milestone("shelved", time(9, 1), Some(1))]);
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let r = resolver().with_display_offset(pacific);
        let status = r.status_for(&tl, Version::new(1));
        assert_eq!(
            status.display(true),
            "v1 Accessioned (indexed, ingested) 2013-09-01 05:10AM"
        );
        assert_eq!(status.display_simplified(), "Accessioned");
        assert_eq!(status.to_string(), "v1 Accessioned (indexed, ingested)");
    }

    #[test]
    fn custom_terminal_step_short_circuits() {
        let table = StatusCodeTable::builder()
            .step("received", 1, "Received")
            .step("released", 2, "Released")
            .step("withdrawn", 3, "Withdrawn")
            .terminal("released")
            .build()
            .unwrap();
        let tl = timeline(vec![
            milestone("released", time(9, 1), None),
            milestone("withdrawn", time(9, 2), None),
        ]);
        let info = StatusResolver::new(table).resolve(&tl, Version::new(1));
        assert_eq!(info.code, StatusCode::new(2));
    }

    #[test]
    fn from_config_applies_offset() {
        let config = TableConfig {
            display_utc_offset_minutes: 60,
            ..TableConfig::default()
        };
        let resolver = StatusResolver::from_config(&config).unwrap();
        assert_eq!(resolver.display_offset(), FixedOffset::east_opt(3600).unwrap());
        assert_eq!(resolver.table(), &StatusCodeTable::standard());
    }

    #[test]
    fn render_reuses_stored_info() {
        let r = resolver();
        let info = StatusInfo {
            version: Version::new(5),
            code: StatusCode::new(9),
            time: None,
        };
        assert_eq!(r.render(info.clone()).display(true), "v5 Opened");
        assert_eq!(r.render(info.clone()).into_info(), info);
    }
}
