//! Object status resolution and rendering.
//!
//! A [`StatusResolver`] turns a [`MilestoneTimeline`](crate::core::MilestoneTimeline)
//! and a target version into a [`StatusInfo`]: a status code and the time
//! the object reached it. [`ObjectStatus`] renders that result as
//! `v{version} {text}`, optionally with the time, or as simplified text.
//!
//! Sparse input never fails: no matching milestone means status code 0.

mod display;
mod resolver;

pub use display::{
    format_status_time, format_timestamp_text, parse_timestamp_text, simplify_display_text,
    TimeFormatError, DISPLAY_TIME_FORMAT,
};
pub use resolver::{ObjectStatus, StatusInfo, StatusResolver};
