//! Loader: Gyroscope "Travels" CSV rows into typed [`Segment`]s
//!
//! Each row is deserialized by column name into a [`SegmentRecord`] and then
//! converted to a [`Segment`] right away, so nothing downstream ever touches
//! untyped row data.

use crate::error::{GyroError, Result};
use crate::parser::datetime::parse_flexible_datetime;
use crate::parser::points::parse_points;
use crate::types::{Segment, SegmentRecord};
use chrono::{FixedOffset, Offset, Utc};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Options controlling how input rows are interpreted
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Offset assumed for date-times written without one
    pub default_offset: FixedOffset,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            default_offset: Utc.fix(),
        }
    }
}

/// Load all segments from a CSV stream, preserving row order.
///
/// The first malformed row aborts loading with an error naming that row.
pub fn load_segments<R: Read>(reader: R, options: &LoadOptions) -> Result<Vec<Segment>> {
    info!("Loading input CSV...");
    debug!(
        "Date-times without an offset are read as UTC{}",
        options.default_offset
    );

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|source| GyroError::Csv { row: 1, source })?
        .clone();

    let mut segments = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|source| GyroError::Csv {
            row: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        let row = record.position().map(|p| p.line()).unwrap_or(0);

        let raw: SegmentRecord = record
            .deserialize(Some(&headers))
            .map_err(|source| GyroError::Csv { row, source })?;
        segments.push(segment_from_record(raw, row, options)?);
    }

    info!("Loaded {} segments", segments.len());
    Ok(segments)
}

/// Open `path` and load its segments
pub fn load_segments_from_path(path: &Path, options: &LoadOptions) -> Result<Vec<Segment>> {
    let file = File::open(path)?;
    load_segments(BufReader::new(file), options)
}

/// Convert one raw row into a typed segment
pub fn segment_from_record(
    raw: SegmentRecord,
    row: u64,
    options: &LoadOptions,
) -> Result<Segment> {
    let start_time = parse_flexible_datetime(&raw.start_time, options.default_offset)
        .ok_or_else(|| GyroError::InvalidDate {
            row,
            column: "Start Time",
            value: raw.start_time.clone(),
        })?;
    let end_time = parse_flexible_datetime(&raw.end_time, options.default_offset)
        .ok_or_else(|| GyroError::InvalidDate {
            row,
            column: "End Time",
            value: raw.end_time.clone(),
        })?;
    let points =
        parse_points(&raw.points).map_err(|reason| GyroError::InvalidPoints { row, reason })?;

    Ok(Segment {
        start_time,
        end_time,
        kind: raw.kind,
        points,
        source_service: raw.service,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    const HEADER: &str = "Start Time,End Time,Type,Points,Service,Distance\n";

    fn load(body: &str) -> Result<Vec<Segment>> {
        let input = format!("{HEADER}{body}");
        load_segments(input.as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn test_load_preserves_row_order_and_fields() {
        let segments = load(concat!(
            "2024-01-02 10:00:00,2024-01-02 10:30:00,driving,\"(1.0, 2.0),(1.5, 2.5)\",moves,12\n",
            "2024-01-01 08:00:00,2024-01-01 08:10:00,walking,\"(3.0, 4.0)\",gyroscope,1\n",
        ))
        .unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].kind, "driving");
        assert_eq!(segments[0].source_service, "moves");
        assert_eq!(
            segments[0].points,
            vec![Coordinate::new(1.0, 2.0), Coordinate::new(1.5, 2.5)]
        );
        assert_eq!(segments[1].kind, "walking");
        assert_eq!(
            segments[1].start_time.to_rfc3339(),
            "2024-01-01T08:00:00+00:00"
        );
    }

    #[test]
    fn test_load_empty_body() {
        assert!(load("").unwrap().is_empty());
    }

    #[test]
    fn test_bad_date_names_row_and_column() {
        let err = load(concat!(
            "2024-01-01 08:00:00,2024-01-01 08:10:00,walking,\"(3.0, 4.0)\",gyroscope,1\n",
            "2024-01-01 09:00:00,yesterday-ish,walking,\"(3.0, 4.0)\",gyroscope,1\n",
        ))
        .unwrap_err();

        match err {
            GyroError::InvalidDate { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, "End Time");
                assert_eq!(value, "yesterday-ish");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_points_names_row() {
        let err = load(
            "2024-01-01 08:00:00,2024-01-01 08:10:00,walking,\"(3.0; 4.0)\",gyroscope,1\n",
        )
        .unwrap_err();
        assert!(matches!(err, GyroError::InvalidPoints { row: 2, .. }));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let input = "Start Time,End Time,Points,Service\n2024-01-01,2024-01-01,\"(1, 2)\",x\n";
        let err = load_segments(input.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, GyroError::Csv { row: 2, .. }));
        assert!(err.to_string().contains("Type"));
    }
}
