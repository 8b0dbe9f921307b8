//! Command-line interface: build a mosaic from a directory of candidate images

use crate::algorithm::scheduler::{FillScheduler, RunSummary};
use crate::analysis::target::TargetColorMatrix;
use crate::io::configuration::{
    DEFAULT_OUTER_RESOLUTION, DEFAULT_SEED, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TILE_PIXELS,
    DEFAULT_TOLERANCE, DEFAULT_VIEWPORT_EXTENT, GIF_FRAME_DELAY_MS, MosaicConfig, OUTPUT_SUFFIX,
    TARGET_ACQUIRE_ATTEMPTS,
};
use crate::io::directory::DirectorySource;
use crate::io::error::{MosaicError, Result, unavailable};
use crate::io::image::{export_mosaic, load_tile_from_path};
use crate::io::progress::ProgressManager;
use crate::io::source::CandidateSource;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::grid::MosaicGrid;
use clap::Parser;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "chromatile")]
#[command(
    author,
    version,
    about = "Assemble a photomosaic from a directory of candidate images"
)]
/// Command-line arguments for the mosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of candidate images
    #[arg(value_name = "CANDIDATES")]
    pub candidates: PathBuf,

    /// Target image to reproduce (picked at random from the candidates if omitted)
    #[arg(short = 'T', long)]
    pub target: Option<PathBuf>,

    /// Grid side length in cells
    #[arg(short = 'n', long = "grid", default_value_t = DEFAULT_OUTER_RESOLUTION)]
    pub grid: usize,

    /// Thumbnail side length used to find a candidate's dominant color
    #[arg(short = 'k', long = "inner")]
    pub inner: Option<usize>,

    /// Viewport extent in pixels; the thumbnail side defaults to viewport / grid
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_EXTENT)]
    pub viewport: usize,

    /// Maximum redmean color distance for a match
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Let each candidate fill at most one cell
    #[arg(long)]
    pub no_repeats: bool,

    /// Scheduling period in milliseconds
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_ms: u64,

    /// Upper bound on concurrent candidate acquisitions
    #[arg(long)]
    pub max_in_flight: Option<usize>,

    /// Never place the same candidate file twice
    #[arg(short, long)]
    pub unique_sources: bool,

    /// Minimum share of thumbnail samples the dominant color must cover
    #[arg(long, default_value_t = 0.0)]
    pub min_dominance: f64,

    /// Random seed for reproducible candidate selection
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output image path (defaults to <target>_mosaic.png beside the candidates)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Edge length of one tile in the exported image
    #[arg(long, default_value_t = DEFAULT_TILE_PIXELS)]
    pub tile_px: u32,

    /// Stop after this many seconds and export whatever is filled
    #[arg(short, long)]
    pub deadline_secs: Option<u64>,

    /// Also export the fill order as an animated GIF
    #[arg(long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Whether one candidate may fill several cells
    pub const fn allow_repeats(&self) -> bool {
        !self.no_repeats
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Mosaic parameters selected by the arguments
    pub fn config(&self) -> MosaicConfig {
        MosaicConfig {
            outer_resolution: self.grid,
            inner_resolution: self.inner,
            viewport_extent: self.viewport,
            tolerance: self.tolerance,
            allow_repeats: self.allow_repeats(),
            tick_interval: Duration::from_millis(self.tick_ms),
            max_in_flight: self.max_in_flight,
            unique_sources: self.unique_sources,
            min_dominance: self.min_dominance,
        }
    }

    /// Where the mosaic for `target` is written
    pub fn output_path(&self, target: &Path) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = target.file_stem().unwrap_or_default();
            let name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());
            match self.candidates.parent() {
                Some(parent) => parent.join(name),
                None => PathBuf::from(name),
            }
        })
    }

    /// Where the fill animation for `output` is written
    pub fn visualization_path(output: &Path) -> PathBuf {
        let stem = output.file_stem().unwrap_or_default();
        let name = format!("{}_fill.gif", stem.to_string_lossy());
        match output.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// Drives one mosaic run from parsed arguments to exported files
pub struct MosaicRunner {
    cli: Cli,
}

impl MosaicRunner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this runner was created with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Build, fill and export the mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The candidate directory is unreadable or has no other images
    /// - No target image could be loaded or acquired
    /// - Exporting the mosaic or the animation fails
    pub async fn run(&self) -> Result<RunSummary> {
        let config = self.cli.config();
        config.validate()?;

        let mut source = DirectorySource::open(&self.cli.candidates, self.cli.seed)?;
        let (target_image, target_path) = match &self.cli.target {
            Some(path) => (load_target(path)?, path.clone()),
            None => acquire_target(&source).await?,
        };
        tracing::info!(image = %target_path.display(), "Selected target image");

        source.exclude(&target_path);
        if source.files().is_empty() {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "'{}' holds no candidates besides the target",
                    self.cli.candidates.display()
                ),
            });
        }

        let targets = TargetColorMatrix::extract(&target_image, config.outer_resolution)?;
        let scheduler = FillScheduler::new(
            MosaicGrid::new(targets.clone()),
            Arc::new(source),
            &config,
        )?;

        let mut events = scheduler.subscribe();
        let label = target_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(&label, scheduler.progress())
        } else {
            ProgressManager::hidden(scheduler.progress())
        };
        let mut capture = self.cli.visualize.then(|| VisualizationCapture::new(targets));

        if let Some(secs) = self.cli.deadline_secs {
            let stop = scheduler.stop_handle();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                tracing::info!(seconds = secs, "Deadline reached, stopping fill");
                stop.stop();
            });
        }

        let run = scheduler.run();
        tokio::pin!(run);
        let summary = loop {
            tokio::select! {
                summary = &mut run => break summary,
                Some(assignment) = events.recv() => {
                    progress.observe(&assignment);
                    if let Some(capture) = capture.as_mut() {
                        capture.record(&assignment);
                    }
                }
            }
        };
        while let Ok(assignment) = events.try_recv() {
            progress.observe(&assignment);
            if let Some(capture) = capture.as_mut() {
                capture.record(&assignment);
            }
        }
        progress.finish(&summary);

        let output_path = self.cli.output_path(&target_path);
        export_mosaic(
            &scheduler.snapshot(),
            self.cli.tile_px,
            &output_path,
            load_tile_from_path,
        )?;

        if let Some(capture) = capture.filter(|c| c.event_count() > 0) {
            let viz_path = Cli::visualization_path(&output_path);
            capture.export_gif(&viz_path, GIF_FRAME_DELAY_MS)?;
            tracing::info!(path = %viz_path.display(), "Exported fill animation");
        }

        Ok(summary)
    }
}

/// Load the target image from disk
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_target(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Draw a target image from the candidate source itself
///
/// Recoverable failures are retried a bounded number of times.
///
/// # Errors
///
/// Returns an error if every attempt fails or a non-recoverable error occurs
pub async fn acquire_target(source: &dyn CandidateSource) -> Result<(RgbImage, PathBuf)> {
    for attempt in 1..=TARGET_ACQUIRE_ATTEMPTS {
        match source.acquire().await {
            Ok(candidate) => {
                let path = PathBuf::from(candidate.source.as_str());
                return Ok((candidate.image, path));
            }
            Err(error) if error.is_recoverable() => {
                tracing::warn!(attempt, error = %error, "Target acquisition failed, retrying");
            }
            Err(error) => return Err(error),
        }
    }

    Err(unavailable(&format!(
        "no target image after {TARGET_ACQUIRE_ATTEMPTS} attempts"
    )))
}
