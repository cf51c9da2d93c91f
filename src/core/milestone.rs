//! Lifecycle milestones and the timeline that holds them.
//!
//! A timeline is immutable: [`MilestoneTimeline::record`] returns a new
//! timeline with the milestone appended and leaves the original untouched.

use super::selection::first_max_by_key;
use super::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, timestamped lifecycle event.
///
/// `version` is optional: an untagged milestone applies to whichever
/// version of the object is currently open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub version: Option<Version>,
}

impl Milestone {
    pub fn new(name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            timestamp,
            version: None,
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }
}

/// Ordered milestones for one object.
///
/// Order carries no meaning beyond breaking timestamp ties: when two
/// milestones are equally recent, the one recorded first wins.
///
/// # Example
///
/// ```rust
/// use milestone::core::{Milestone, MilestoneTimeline, Version};
/// use chrono::{TimeZone, Utc};
///
/// let timeline = MilestoneTimeline::new("druid:bb123cd4567", Vec::new());
/// let submitted = Utc.with_ymd_and_hms(2013, 9, 1, 12, 10, 56).unwrap();
///
/// let extended =
///     timeline.record(Milestone::new("submitted", submitted).with_version(Version::new(1)));
///
/// assert!(timeline.is_empty());
/// assert_eq!(extended.len(), 1);
/// assert_eq!(extended.time_of("submitted", Some(Version::new(1))), Some(submitted));
/// assert_eq!(extended.time_of("submitted", Some(Version::new(2))), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTimeline {
    object_id: String,
    milestones: Vec<Milestone>,
}

impl MilestoneTimeline {
    pub fn new(object_id: impl Into<String>, milestones: Vec<Milestone>) -> Self {
        Self {
            object_id: object_id.into(),
            milestones,
        }
    }

    /// Append a milestone, returning a new timeline.
    pub fn record(&self, milestone: Milestone) -> Self {
        let mut milestones = self.milestones.clone();
        milestones.push(milestone);
        Self {
            object_id: self.object_id.clone(),
            milestones,
        }
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Milestone> {
        self.milestones.iter()
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Time at which the named milestone was reached.
    ///
    /// With `version` set, only milestones tagged with exactly that version
    /// are considered. When several match, the latest timestamp wins and
    /// the first recorded breaks a tie.
    pub fn time_of(&self, name: &str, version: Option<Version>) -> Option<DateTime<Utc>> {
        let matching = self
            .milestones
            .iter()
            .filter(|m| m.name == name)
            .filter(|m| version.map_or(true, |v| m.version == Some(v)));
        first_max_by_key(matching, |m| m.timestamp).map(|m| m.timestamp)
    }
}

impl<'a> IntoIterator for &'a MilestoneTimeline {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.milestones.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 9, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn new_timeline_is_empty() {
        let timeline = MilestoneTimeline::new("druid:abc", Vec::new());
        assert!(timeline.is_empty());
        assert_eq!(timeline.len(), 0);
        assert_eq!(timeline.object_id(), "druid:abc");
    }

    #[test]
    fn record_is_immutable() {
        let timeline = MilestoneTimeline::new("druid:abc", Vec::new());
        let next = timeline.record(Milestone::new("registered", at(1, 1)));

        assert_eq!(timeline.len(), 0);
        assert_eq!(next.len(), 1);
        assert_eq!(next.object_id(), "druid:abc");
    }

    #[test]
    fn record_preserves_order() {
        let timeline = MilestoneTimeline::new("druid:abc", Vec::new())
            .record(Milestone::new("registered", at(1, 1)))
            .record(Milestone::new("submitted", at(1, 2)))
            .record(Milestone::new("described", at(1, 3)));

        let names: Vec<_> = timeline.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["registered", "submitted", "described"]);
    }

    #[test]
    fn time_of_missing_name_is_absent() {
        let timeline =
            MilestoneTimeline::new("druid:abc", vec![Milestone::new("registered", at(1, 1))]);
        assert_eq!(timeline.time_of("accessioned", None), None);
    }

    #[test]
    fn time_of_picks_latest_across_versions() {
        let timeline = MilestoneTimeline::new(
            "druid:abc",
            vec![
                Milestone::new("opened", at(1, 1)).with_version(Version::new(1)),
                Milestone::new("opened", at(5, 1)).with_version(Version::new(2)),
                Milestone::new("opened", at(3, 1)),
            ],
        );
        assert_eq!(timeline.time_of("opened", None), Some(at(5, 1)));
        assert_eq!(timeline.time_of("opened", Some(Version::new(1))), Some(at(1, 1)));
    }

    #[test]
    fn time_of_with_version_ignores_untagged() {
        let timeline =
            MilestoneTimeline::new("druid:abc", vec![Milestone::new("opened", at(3, 1))]);
        assert_eq!(timeline.time_of("opened", Some(Version::new(1))), None);
    }

    #[test]
    fn milestone_deserializes_without_version() {
        let json = r#"{"name":"deposited","timestamp":"2013-10-01T12:10:56Z"}"#;
        let milestone: Milestone = serde_json::from_str(json).unwrap();
        assert_eq!(milestone.version, None);
        assert_eq!(
            milestone.timestamp,
            Utc.with_ymd_and_hms(2013, 10, 1, 12, 10, 56).unwrap()
        );
    }
}
