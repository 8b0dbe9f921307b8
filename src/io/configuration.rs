//! Mosaic constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use std::time::Duration;

/// Default grid side length in cells
pub const DEFAULT_OUTER_RESOLUTION: usize = 75;

/// Default viewport extent the inner resolution is derived from, in pixels
pub const DEFAULT_VIEWPORT_EXTENT: usize = 900;

/// Default maximum redmean distance for a match
pub const DEFAULT_TOLERANCE: f64 = 100.0;

/// Whether one candidate may fill several cells by default
pub const DEFAULT_ALLOW_REPEATS: bool = true;

/// Default scheduling period
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Fixed seed for reproducible candidate selection
pub const DEFAULT_SEED: u64 = 42;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;

/// Maximum allowed thumbnail dimension for candidate reduction
pub const MAX_INNER_RESOLUTION: usize = 512;

/// Attempts made to acquire a target image from the candidate source
pub const TARGET_ACQUIRE_ATTEMPTS: usize = 20;

/// Default edge length of one mosaic tile in the exported image
pub const DEFAULT_TILE_PIXELS: u32 = 16;

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

/// Runtime parameters for one mosaic run
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicConfig {
    /// Grid side length in cells
    pub outer_resolution: usize,
    /// Explicit thumbnail side length, derived from the viewport if absent
    pub inner_resolution: Option<usize>,
    /// Viewport extent used to derive the inner resolution
    pub viewport_extent: usize,
    /// Maximum redmean distance for a match
    pub tolerance: f64,
    /// Whether one candidate may fill every matching empty cell in its scan
    pub allow_repeats: bool,
    /// Scheduling period
    pub tick_interval: Duration,
    /// Upper bound on concurrent acquisitions (unbounded if absent)
    pub max_in_flight: Option<usize>,
    /// Discard candidates whose source already fills a cell
    pub unique_sources: bool,
    /// Minimum share of thumbnail samples the dominant color must cover
    pub min_dominance: f64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            outer_resolution: DEFAULT_OUTER_RESOLUTION,
            inner_resolution: None,
            viewport_extent: DEFAULT_VIEWPORT_EXTENT,
            tolerance: DEFAULT_TOLERANCE,
            allow_repeats: DEFAULT_ALLOW_REPEATS,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            max_in_flight: None,
            unique_sources: false,
            min_dominance: 0.0,
        }
    }
}

impl MosaicConfig {
    /// Thumbnail side length used when reducing candidates
    ///
    /// Falls back to the viewport extent split across the grid, never below one.
    pub fn inner_resolution(&self) -> usize {
        self.inner_resolution.unwrap_or_else(|| {
            self.viewport_extent
                .checked_div(self.outer_resolution)
                .unwrap_or(1)
                .max(1)
        })
    }

    /// Check every parameter against its allowed range
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter that is out of range
    pub fn validate(&self) -> Result<()> {
        if self.outer_resolution == 0 || self.outer_resolution > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "outer_resolution",
                &self.outer_resolution,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }

        let inner = self.inner_resolution();
        if inner == 0 || inner > MAX_INNER_RESOLUTION {
            return Err(invalid_parameter(
                "inner_resolution",
                &inner,
                &format!("must be between 1 and {MAX_INNER_RESOLUTION}"),
            ));
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(invalid_parameter(
                "tolerance",
                &self.tolerance,
                &"must be a finite, non-negative number",
            ));
        }

        if self.tick_interval.is_zero() {
            return Err(invalid_parameter(
                "tick_interval",
                &format!("{:?}", self.tick_interval),
                &"must be greater than zero",
            ));
        }

        if self.max_in_flight == Some(0) {
            return Err(invalid_parameter(
                "max_in_flight",
                &0,
                &"must allow at least one acquisition",
            ));
        }

        if !(0.0..=1.0).contains(&self.min_dominance) {
            return Err(invalid_parameter(
                "min_dominance",
                &self.min_dominance,
                &"must be a fraction between 0 and 1",
            ));
        }

        Ok(())
    }
}
