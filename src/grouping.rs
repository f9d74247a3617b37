//! Grouper: partition segments by the calendar day they start on
//!
//! A segment that runs past midnight stays wholly on its start day; it is
//! never split.

use crate::types::Segment;
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;

/// Segments of one day, ascending by start time
pub type DayGroups = BTreeMap<NaiveDate, Vec<Segment>>;

/// Group segments by start date and sort each day chronologically.
///
/// Rows for the same date land in one group even when they are not adjacent
/// in the input. The sort is stable, so equal start times keep input order.
pub fn group_by_day(segments: Vec<Segment>) -> DayGroups {
    info!("Grouping {} segments by day...", segments.len());

    let mut groups = DayGroups::new();
    for segment in segments {
        groups.entry(segment.day()).or_default().push(segment);
    }
    for day_segments in groups.values_mut() {
        day_segments.sort_by_key(|s| s.start_time);
    }

    info!("Found {} days", groups.len());
    groups
}
