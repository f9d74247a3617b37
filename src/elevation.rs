//! Elevation lookup for track points
//!
//! [`SrtmTiles`] answers lookups from SRTM height tiles (`.hgt`, named after
//! their south-west corner such as `N45E006.hgt`) kept in a local cache
//! directory. Tile decoding and caching are done by [`htg::SrtmService`].

use crate::error::{GyroError, Result};
use htg::SrtmService;
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Number of decoded tiles kept in memory
pub const DEFAULT_TILE_CACHE_SIZE: usize = 8;

/// Something that can tell the elevation at a coordinate.
///
/// `Ok(None)` means the source has no data there; `Err` means the lookup
/// itself failed. Neither is fatal to the caller.
pub trait ElevationSource {
    fn elevation(&mut self, latitude: f64, longitude: f64) -> Result<Option<f64>>;
}

/// Source that never has data
#[derive(Debug, Default, Clone, Copy)]
pub struct NoElevation;

impl ElevationSource for NoElevation {
    fn elevation(&mut self, _latitude: f64, _longitude: f64) -> Result<Option<f64>> {
        Ok(None)
    }
}

/// South-west corner of the 1x1 degree tile containing a coordinate
fn tile_origin(latitude: f64, longitude: f64) -> (i32, i32) {
    (latitude.floor() as i32, longitude.floor() as i32)
}

/// SRTM tiles from a cache directory.
///
/// Heights are bilinearly interpolated; void samples give `Ok(None)`. A tile
/// whose lookup fails (absent or unreadable) is reported once and then
/// treated as having no data for the rest of the run.
pub struct SrtmTiles {
    directory: PathBuf,
    service: SrtmService,
    unavailable: HashSet<(i32, i32)>,
}

impl SrtmTiles {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self::with_cache_size(directory, DEFAULT_TILE_CACHE_SIZE)
    }

    pub fn with_cache_size(directory: impl AsRef<Path>, cache_size: usize) -> Self {
        let directory = directory.as_ref().to_path_buf();
        let service = SrtmService::new(&*directory.to_string_lossy(), cache_size as u64);
        Self {
            directory,
            service,
            unavailable: HashSet::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ElevationSource for SrtmTiles {
    fn elevation(&mut self, latitude: f64, longitude: f64) -> Result<Option<f64>> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Ok(None);
        }

        let origin = tile_origin(latitude, longitude);
        if self.unavailable.contains(&origin) {
            return Ok(None);
        }

        match self.service.get_elevation_interpolated(latitude, longitude) {
            Ok(elevation) => Ok(elevation),
            Err(e) => {
                debug!(
                    "Tile ({}, {}) unavailable, skipping further lookups in it",
                    origin.0, origin.1
                );
                self.unavailable.insert(origin);
                Err(GyroError::Elevation(format!(
                    "tile ({}, {}) in {}: {}",
                    origin.0,
                    origin.1,
                    self.directory.display(),
                    e
                )))
            }
        }
    }
}
