use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;

/// A raw coordinate pair from the `Points` column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One row of a Gyroscope "Travels" export, exactly as it appears in the file.
///
/// Columns are matched by header name; any other columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "Points")]
    pub points: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Service")]
    pub service: String,
}

/// A typed travel segment
///
/// `points` keeps the order of the source row: it is the travel order along
/// the segment and is never rearranged.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    /// Free-text activity label ("walking", "driving", ...)
    pub kind: String,
    pub points: Vec<Coordinate>,
    pub source_service: String,
}

impl Segment {
    /// Calendar date of `start_time`, in the offset the time was written in
    pub fn day(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Segment span in seconds (may be zero, or negative for inverted rows)
    pub fn duration_seconds(&self) -> f64 {
        let span = self.end_time - self.start_time;
        match span.num_nanoseconds() {
            Some(ns) => ns as f64 / 1_000_000_000.0,
            None => span.num_milliseconds() as f64 / 1000.0,
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}
