//! Frame capture and GIF generation showing the order cells were filled

use crate::analysis::target::TargetColorMatrix;
use crate::io::error::{MosaicError, Result};
use crate::math::color::Rgb;
use crate::spatial::cell::Assignment;
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// How far empty cells are washed towards grey in rendered frames
const EMPTY_CELL_FADE: f64 = 0.75;

/// Grey that empty cells fade towards
const EMPTY_CELL_BASE: Rgb = Rgb::new(128, 128, 128);

/// One recorded fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillEvent {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Dominant color of the candidate that filled the cell
    pub color: Rgb,
}

impl From<&Assignment> for FillEvent {
    fn from(assignment: &Assignment) -> Self {
        Self {
            row: assignment.row,
            col: assignment.col,
            color: assignment.color,
        }
    }
}

/// Records fills for post-run visualization
///
/// Empty cells are drawn as a faded version of their target color, filled
/// cells with the candidate's dominant color, one pixel per cell.
pub struct VisualizationCapture {
    pub(crate) events: Vec<FillEvent>,
    targets: TargetColorMatrix,
}

impl VisualizationCapture {
    /// Start a capture over the run's target colors
    pub fn new(targets: TargetColorMatrix) -> Self {
        let capacity = targets.size() * targets.size();
        Self {
            events: Vec::with_capacity(capacity),
            targets,
        }
    }

    /// Records one assignment
    pub fn record(&mut self, assignment: &Assignment) {
        self.events.push(FillEvent::from(assignment));
    }

    /// Returns all recorded fill events
    pub fn events(&self) -> &[FillEvent] {
        &self.events
    }

    /// Returns the total number of fill events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured fills as a GIF with automatic frame skipping
    ///
    /// If the requested delay is below what viewers reliably support, only
    /// every n-th fill gets its own frame so the apparent speed is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No fills were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;

        if self.events.is_empty() {
            return Err(MosaicError::InvalidSourceData {
                reason: "No fills captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| MosaicError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut canvas = self.blank_canvas();
        let mut frames = vec![Self::frame(&canvas, delay_ms)];

        let mut frame_count = 0;
        for event in &self.events {
            let (Ok(x), Ok(y)) = (u32::try_from(event.col), u32::try_from(event.row)) else {
                continue;
            };
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = Rgba::from(event.color);
                frame_count += 1;

                if frame_count % skip_factor == 0 {
                    frames.push(Self::frame(&canvas, delay_ms));
                }
            }
        }

        if frame_count % skip_factor != 0 {
            frames.push(Self::frame(&canvas, delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(Self::frame(&canvas, delay_ms * 25));

        frames
    }

    fn blank_canvas(&self) -> RgbaImage {
        let side = u32::try_from(self.targets.size()).unwrap_or(0);
        let mut canvas = RgbaImage::new(side, side);
        for ((row, col), &target) in self.targets.colors().indexed_iter() {
            let (Ok(x), Ok(y)) = (u32::try_from(col), u32::try_from(row)) else {
                continue;
            };
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = Rgba::from(target.mix(EMPTY_CELL_BASE, EMPTY_CELL_FADE));
            }
        }
        canvas
    }

    fn frame(canvas: &RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(
            canvas.clone(),
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}
