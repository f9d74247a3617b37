//! Time conversion utilities
//!
//! Linear timestamp interpolation across a segment and conversion of the
//! resulting chrono times into the `time` representation the GPX writer uses.

use crate::error::{GyroError, Result};
use chrono::{DateTime, Duration, FixedOffset};
use time::OffsetDateTime;

/// Seconds between consecutive points of a segment.
///
/// With fewer than two points the step is irrelevant; the divisor is clamped
/// to 1 so it never divides by zero.
pub fn step_seconds(span_seconds: f64, point_count: usize) -> f64 {
    span_seconds / point_count.saturating_sub(1).max(1) as f64
}

/// Spread `count` timestamps evenly from `start` to `end`.
///
/// The first timestamp is exactly `start`; with two or more points the last
/// is exactly `end`. A single point is stamped at `start`. Offsets are
/// computed in integer nanoseconds so no rounding drift accumulates.
pub fn interpolate_timestamps(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    count: usize,
) -> Vec<DateTime<FixedOffset>> {
    match count {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }

    let span = end - start;
    let steps = (count - 1) as i128;

    (0..count)
        .map(|i| start + fraction_of(span, i as i128, steps))
        .collect()
}

/// `span * numerator / denominator`, exact to the nanosecond
fn fraction_of(span: Duration, numerator: i128, denominator: i128) -> Duration {
    match span.num_nanoseconds() {
        Some(ns) => Duration::nanoseconds((i128::from(ns) * numerator / denominator) as i64),
        // Spans beyond ~292 years do not fit in i64 nanoseconds
        None => Duration::milliseconds(
            (i128::from(span.num_milliseconds()) * numerator / denominator) as i64,
        ),
    }
}

/// Convert a chrono timestamp to a GPX time.
///
/// GPX times are UTC instants; the written offset only matters for picking
/// the day a segment belongs to.
pub fn to_gpx_time(timestamp: &DateTime<FixedOffset>) -> Result<gpx::Time> {
    let nanos = timestamp
        .timestamp_nanos_opt()
        .ok_or_else(|| GyroError::Timestamp(format!("{timestamp} is out of range")))?;
    let utc = OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos))
        .map_err(|e| GyroError::Timestamp(e.to_string()))?;

    Ok(utc.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(text).unwrap()
    }

    #[test]
    fn test_step_seconds() {
        assert_eq!(step_seconds(120.0, 2), 120.0);
        assert_eq!(step_seconds(120.0, 5), 30.0);
        assert_eq!(step_seconds(120.0, 1), 120.0);
        assert_eq!(step_seconds(0.0, 0), 0.0);
    }

    #[test]
    fn test_interpolation_hits_both_ends() {
        let start = at("2024-01-01T00:00:00Z");
        let end = at("2024-01-01T00:02:00Z");
        let stamps = interpolate_timestamps(start, end, 2);
        assert_eq!(stamps, vec![start, end]);
    }

    #[test]
    fn test_interpolation_is_monotonic_and_bounded() {
        let start = at("2024-01-01T10:00:00+01:00");
        let end = at("2024-01-01T10:00:10+01:00");
        let stamps = interpolate_timestamps(start, end, 4);

        assert_eq!(stamps.len(), 4);
        assert_eq!(stamps[0], start);
        assert_eq!(stamps[3], end);
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert!(stamps.iter().all(|t| *t >= start && *t <= end));
        // 10s / 3 steps
        assert_eq!(
            (stamps[1] - start).num_nanoseconds(),
            Some(3_333_333_333)
        );
        assert_eq!(stamps[1].offset(), start.offset());
    }

    #[test]
    fn test_single_point_and_zero_span() {
        let start = at("2024-01-01T00:05:00Z");
        assert_eq!(interpolate_timestamps(start, at("2024-01-01T00:09:00Z"), 1), vec![start]);
        assert_eq!(interpolate_timestamps(start, start, 3), vec![start; 3]);
        assert!(interpolate_timestamps(start, start, 0).is_empty());
    }

    #[test]
    fn test_to_gpx_time_is_utc_instant() {
        let time = to_gpx_time(&at("2024-01-01T00:02:00Z")).unwrap();
        assert_eq!(time.format().unwrap(), "2024-01-01T00:02:00.000000000Z");

        let shifted = to_gpx_time(&at("2024-01-01T02:02:00+02:00")).unwrap();
        assert_eq!(shifted.format().unwrap(), "2024-01-01T00:02:00.000000000Z");
        assert_eq!(shifted, time);

        let instant: OffsetDateTime = shifted.into();
        assert_eq!(instant.unix_timestamp(), 1_704_067_320);
    }
}
