//! CLI binary for gyroscope2gpx
//!
//! Reads a Gyroscope "Travels" CSV export and writes one GPX file per day.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use gyroscope2gpx::{
    convert_file, parse_utc_offset, ElevationSource, ExportOptions, LoadOptions, NoElevation,
    SrtmTiles, DEFAULT_OUTPUT_DIR,
};
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

fn build_command() -> Command {
    Command::new("gyroscope2gpx")
        .version(VERSION)
        .about("Reads a 'Travels' CSV export from Gyroscope and converts it to daily GPX files.")
        .arg(
            Arg::new("input")
                .help("CSV file exported from Gyroscope")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .alias("outputdir")
                .help("Directory for the GPX files (created if missing)")
                .value_name("DIR")
                .default_value(DEFAULT_OUTPUT_DIR),
        )
        .arg(
            Arg::new("elevation-dir")
                .long("elevation-dir")
                .help("Directory holding SRTM .hgt tiles used for elevation lookups")
                .value_name("DIR")
                .default_value("."),
        )
        .arg(
            Arg::new("no-elevation")
                .long("no-elevation")
                .help("Do not look up elevation; points are written without <ele>")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("utc-offset")
                .long("utc-offset")
                .help("Offset for times written without one, e.g. +02:00")
                .value_name("OFFSET")
                .allow_hyphen_values(true)
                .default_value("+00:00"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output with per-segment details")
                .action(clap::ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
        .context("Failed to initialize logging")
}

fn load_options(matches: &ArgMatches) -> Result<LoadOptions> {
    let offset = matches
        .get_one::<String>("utc-offset")
        .map(String::as_str)
        .unwrap_or("+00:00");
    let default_offset = parse_utc_offset(offset)
        .with_context(|| format!("Invalid --utc-offset '{offset}' (expected e.g. +02:00)"))?;
    Ok(LoadOptions { default_offset })
}

fn export_options(matches: &ArgMatches) -> ExportOptions {
    let mut options = ExportOptions::default();
    if let Some(dir) = matches.get_one::<String>("output-dir") {
        options.output_dir = PathBuf::from(dir);
    }
    options
}

fn elevation_source(matches: &ArgMatches) -> Box<dyn ElevationSource> {
    if matches.get_flag("no-elevation") {
        return Box::new(NoElevation);
    }
    let dir = matches
        .get_one::<String>("elevation-dir")
        .map(String::as_str)
        .unwrap_or(".");
    Box::new(SrtmTiles::new(dir))
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("debug"))?;

    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .context("No input file given")?;
    let load_options = load_options(&matches)?;
    let export_options = export_options(&matches);
    let mut elevation = elevation_source(&matches);

    let report = convert_file(&input, &load_options, &export_options, elevation.as_mut())
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    info!(
        "{} segments, {} points, elevation for {} points",
        report.segments, report.points, report.elevation.filled
    );

    if !report.is_success() {
        for failure in &report.failures {
            error!("{}: {}", failure.day, failure.error);
        }
        bail!(
            "{} of {} days could not be written",
            report.failures.len(),
            report.failures.len() + report.written.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn matches(args: &[&str]) -> ArgMatches {
        build_command()
            .try_get_matches_from(std::iter::once("gyroscope2gpx").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults() {
        let m = matches(&["travels.csv"]);
        assert_eq!(m.get_one::<String>("input").unwrap(), "travels.csv");
        assert_eq!(
            export_options(&m).output_dir,
            PathBuf::from("./gyroscope2gpx_output/")
        );
        assert_eq!(
            load_options(&m).unwrap().default_offset,
            FixedOffset::east_opt(0).unwrap()
        );
        assert!(!m.get_flag("debug"));
        assert!(!m.get_flag("no-elevation"));
    }

    #[test]
    fn test_custom_options() {
        let m = matches(&[
            "travels.csv",
            "-o",
            "/tmp/gpx",
            "--utc-offset",
            "-05:00",
            "--debug",
        ]);
        assert_eq!(export_options(&m).output_dir, PathBuf::from("/tmp/gpx"));
        assert_eq!(
            load_options(&m).unwrap().default_offset,
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
        assert!(m.get_flag("debug"));
    }

    #[test]
    fn test_invalid_offset_is_rejected() {
        let m = matches(&["travels.csv", "--utc-offset", "later"]);
        assert!(load_options(&m).is_err());

        let m = matches(&["travels.csv", "--utc-offset", "+1é2"]);
        assert!(load_options(&m).is_err());
    }

    #[test]
    fn test_input_is_required() {
        assert!(build_command()
            .try_get_matches_from(["gyroscope2gpx"])
            .is_err());
    }
}
