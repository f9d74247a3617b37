//! Export of day tracks to GPX files
//!
//! Contains the per-day GPX serialization and the top-level conversion that
//! drives loading, grouping, track building and writing. Every day is written
//! to its own `<YYYYMMDD>_gyroscope.gpx`; a failing day does not stop the
//! others.

use crate::conversion::to_gpx_time;
use crate::elevation::ElevationSource;
use crate::error::{GyroError, Result};
use crate::grouping::group_by_day;
use crate::parser::{load_segments_from_path, LoadOptions};
use crate::track::{add_elevations, build_day_track, ElevationStats};
use crate::types::{format_day_key, DayTrack, Segment};
use chrono::NaiveDate;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Metadata, Track, Waypoint};
use log::{info, warn};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default directory for the generated GPX files
pub const DEFAULT_OUTPUT_DIR: &str = "./gyroscope2gpx_output/";

/// Creator string written into every GPX document
pub const DEFAULT_CREATOR: &str = "gyroscope2gpx";

/// Export options for controlling where and how GPX files are written
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub creator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            creator: DEFAULT_CREATOR.to_string(),
        }
    }
}

/// A day whose file could not be produced
#[derive(Debug)]
pub struct DayFailure {
    pub day: NaiveDate,
    pub error: GyroError,
}

/// Results of a conversion run
#[derive(Debug, Default)]
pub struct ExportReport {
    pub segments: usize,
    pub points: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<DayFailure>,
    pub elevation: ElevationStats,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Output path for a day: `<output_dir>/<YYYYMMDD>_gyroscope.gpx`
pub fn compute_export_path(output_dir: &Path, day: NaiveDate) -> PathBuf {
    output_dir.join(format!("{}_gyroscope.gpx", format_day_key(day)))
}

/// Build the GPX document for one day
pub fn day_track_to_gpx(track: &DayTrack, creator: &str) -> Result<Gpx> {
    let mut gpx_track = Track::new();
    gpx_track.name = Some(track.name());

    for segment in &track.segments {
        let mut gpx_segment = gpx::TrackSegment::new();
        for point in &segment.points {
            // geo-types points are (x, y) = (longitude, latitude)
            let mut waypoint = Waypoint::new(Point::new(point.longitude, point.latitude));
            waypoint.elevation = point.elevation;
            waypoint.time = Some(to_gpx_time(&point.time)?);
            gpx_segment.points.push(waypoint);
        }
        gpx_track.segments.push(gpx_segment);
    }

    Ok(Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(creator.to_string()),
        metadata: Some(Metadata {
            name: Some(track.name()),
            ..Default::default()
        }),
        waypoints: Vec::new(),
        tracks: vec![gpx_track],
        routes: Vec::new(),
    })
}

/// Write one day's track, creating the output directory if needed.
///
/// The document goes to a temporary file in the output directory first and is
/// renamed into place, so a failed write never leaves a truncated GPX file.
pub fn export_day(track: &DayTrack, options: &ExportOptions) -> Result<PathBuf> {
    let path = compute_export_path(&options.output_dir, track.day);
    let gpx = day_track_to_gpx(track, &options.creator)?;

    fs::create_dir_all(&options.output_dir).map_err(|source| GyroError::Export {
        path: options.output_dir.clone(),
        source,
    })?;

    info!("Writing {}...", path.display());
    let export_error = |source: std::io::Error| GyroError::Export {
        path: path.clone(),
        source,
    };

    let mut temp = NamedTempFile::new_in(&options.output_dir).map_err(export_error)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        gpx::write(&gpx, &mut writer)?;
        writer.flush().map_err(export_error)?;
    }
    temp.persist(&path).map_err(|e| export_error(e.error))?;

    Ok(path)
}

/// Group already-loaded segments by day and write one GPX file per day
pub fn convert_segments(
    segments: Vec<Segment>,
    options: &ExportOptions,
    elevation: &mut dyn ElevationSource,
) -> ExportReport {
    let mut report = ExportReport {
        segments: segments.len(),
        ..Default::default()
    };

    for (day, day_segments) in group_by_day(segments) {
        let mut track = build_day_track(day, &day_segments);
        report.points += track.point_count();

        let stats = add_elevations(&mut track, elevation);
        report.elevation.filled += stats.filled;
        report.elevation.missing += stats.missing;
        report.elevation.failed += stats.failed;

        match export_day(&track, options) {
            Ok(path) => report.written.push(path),
            Err(error) => {
                warn!("Skipping {}: {}", track.day_key(), error);
                report.failures.push(DayFailure { day, error });
            }
        }
    }

    report
}

/// Convert a Gyroscope CSV export into daily GPX files.
///
/// Loading errors abort the run; per-day write errors are collected in the
/// returned report.
pub fn convert_file(
    input: &Path,
    load_options: &LoadOptions,
    options: &ExportOptions,
    elevation: &mut dyn ElevationSource,
) -> Result<ExportReport> {
    let segments = load_segments_from_path(input, load_options)?;
    let report = convert_segments(segments, options, elevation);
    info!(
        "Done: {} of {} days written",
        report.written.len(),
        report.written.len() + report.failures.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TrackPoint, TrackSegment};
    use chrono::DateTime;

    fn sample_track() -> DayTrack {
        let time = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        let mut track = DayTrack::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        track.segments.push(TrackSegment {
            kind: "walking".to_string(),
            source_service: "gyroscope".to_string(),
            points: vec![TrackPoint {
                latitude: 47.5,
                longitude: 8.25,
                elevation: Some(410.0),
                time,
            }],
        });
        track
    }

    #[test]
    fn test_compute_export_path() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let path = compute_export_path(Path::new("/tmp/out"), day);
        assert_eq!(path, PathBuf::from("/tmp/out/20240309_gyroscope.gpx"));
    }

    #[test]
    fn test_export_options_defaults() {
        let opts = ExportOptions::default();
        assert_eq!(opts.output_dir, PathBuf::from("./gyroscope2gpx_output/"));
        assert_eq!(opts.creator, "gyroscope2gpx");
    }

    #[test]
    fn test_day_track_to_gpx() {
        let gpx = day_track_to_gpx(&sample_track(), "tester").unwrap();
        assert_eq!(gpx.creator.as_deref(), Some("tester"));
        assert_eq!(
            gpx.metadata.and_then(|m| m.name).as_deref(),
            Some("Gyroscope path: 20240101")
        );
        assert_eq!(gpx.tracks.len(), 1);
        assert_eq!(gpx.tracks[0].name.as_deref(), Some("Gyroscope path: 20240101"));

        let waypoint = &gpx.tracks[0].segments[0].points[0];
        assert_eq!(waypoint.point().y(), 47.5);
        assert_eq!(waypoint.point().x(), 8.25);
        assert_eq!(waypoint.elevation, Some(410.0));
        assert!(waypoint.time.is_some());
    }
}
