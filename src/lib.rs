//! Gyroscope to GPX
//!
//! A Rust library for converting a Gyroscope "Travels" CSV export into one GPX
//! track file per calendar day.
//!
//! # Features
//!
//! - **`cli`** (default): Build the `gyroscope2gpx` command-line binary
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gyroscope2gpx::{convert_file, ExportOptions, LoadOptions, SrtmTiles};
//! use std::path::Path;
//!
//! let mut elevation = SrtmTiles::new(".");
//! let report = convert_file(
//!     Path::new("travels.csv"),
//!     &LoadOptions::default(),
//!     &ExportOptions::default(),
//!     &mut elevation,
//! )
//! .unwrap();
//! for path in &report.written {
//!     println!("Wrote {}", path.display());
//! }
//! ```
//!
//! # Pipeline
//!
//! - [`load_segments`] - Loader: CSV rows into typed [`Segment`]s
//! - [`group_by_day`] - Grouper: segments by start date, sorted by start time
//! - [`build_day_track`] - Track Builder: one sub-segment per segment, interpolated point times
//! - [`add_elevations`] - Elevation enrichment from an [`ElevationSource`]
//! - [`export_day`] - Atomic write of one `<YYYYMMDD>_gyroscope.gpx`
//! - [`convert_file`] - All of the above for one input file

pub mod conversion;
pub mod elevation;
pub mod error;
pub mod export;
pub mod grouping;
pub mod parser;
pub mod track;
pub mod types;

pub use conversion::*;
pub use elevation::*;
pub use error::*;
pub use export::*;
pub use grouping::*;
pub use parser::*;
pub use track::*;
pub use types::*;
