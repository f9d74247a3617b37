//! Track Builder: one day's segments into a [`DayTrack`]
//!
//! Each input segment becomes exactly one output sub-segment, in the order
//! given. Point times are spread linearly across the segment's span, then
//! elevation is filled in as a separate pass over the finished track.

use crate::conversion::{interpolate_timestamps, step_seconds};
use crate::elevation::ElevationSource;
use crate::types::{DayTrack, Segment, TrackPoint, TrackSegment};
use chrono::NaiveDate;
use log::{debug, warn};

/// Outcome counts of an elevation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElevationStats {
    pub filled: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Build the track for `day` from its (already sorted) segments
pub fn build_day_track(day: NaiveDate, segments: &[Segment]) -> DayTrack {
    debug!("Creating track from {} segments...", segments.len());

    let mut track = DayTrack::new(day);
    for (index, segment) in segments.iter().enumerate() {
        track.segments.push(build_track_segment(index, segment));
    }
    track
}

/// Stamp every point of one segment
pub fn build_track_segment(index: usize, segment: &Segment) -> TrackSegment {
    let span = segment.duration_seconds();
    debug!("segment {} {}", index, segment.kind);
    debug!("from {} to {}", segment.start_time, segment.end_time);
    debug!(
        "segment {}: {} points over {}s, {}s between points",
        index,
        segment.point_count(),
        span,
        step_seconds(span, segment.point_count())
    );

    let times = interpolate_timestamps(
        segment.start_time,
        segment.end_time,
        segment.point_count(),
    );
    let points = segment
        .points
        .iter()
        .zip(times)
        .map(|(coordinate, time)| TrackPoint {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            elevation: None,
            time,
        })
        .collect();

    TrackSegment {
        kind: segment.kind.clone(),
        source_service: segment.source_service.clone(),
        points,
    }
}

/// Look up elevation for every point of the track.
///
/// Lookups that fail or have no data leave the point without elevation; the
/// point itself is always kept.
pub fn add_elevations(track: &mut DayTrack, source: &mut dyn ElevationSource) -> ElevationStats {
    debug!("Adding elevation data...");

    let mut stats = ElevationStats::default();
    for point in track.points_mut() {
        match source.elevation(point.latitude, point.longitude) {
            Ok(Some(elevation)) => {
                point.elevation = Some(elevation);
                stats.filled += 1;
            }
            Ok(None) => stats.missing += 1,
            Err(e) => {
                warn!(
                    "No elevation for ({}, {}): {}",
                    point.latitude, point.longitude, e
                );
                stats.failed += 1;
            }
        }
    }

    debug!(
        "Elevation: {} filled, {} missing, {} failed",
        stats.filled, stats.missing, stats.failed
    );
    stats
}
