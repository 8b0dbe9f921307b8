//! Target color extraction: one representative color per grid cell

use crate::analysis::sampling::sample_nearest;
use crate::io::error::{MosaicError, Result};
use crate::math::color::Rgb;
use image::RgbImage;
use ndarray::Array2;

/// Square matrix of target colors, fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetColorMatrix {
    colors: Array2<Rgb>,
}

impl TargetColorMatrix {
    /// Downsample the target image into an `n` x `n` color matrix
    ///
    /// Deterministic for a fixed image and `n`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero or the image has no pixels
    pub fn extract(image: &RgbImage, n: usize) -> Result<Self> {
        let colors = sample_nearest(image, n)?;
        tracing::debug!(
            size = n,
            width = image.width(),
            height = image.height(),
            "Extracted target color matrix"
        );
        Ok(Self { colors })
    }

    /// Build a matrix from explicit rows
    ///
    /// # Errors
    ///
    /// Returns an error if the rows are empty or do not form a square
    pub fn from_rows(rows: &[Vec<Rgb>]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(MosaicError::InvalidSourceData {
                reason: "Target matrix needs at least one row".to_string(),
            });
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "Target matrix row {index} has {} colors, expected {n}",
                    row.len()
                ),
            });
        }

        let flat: Vec<Rgb> = rows.iter().flatten().copied().collect();
        let colors =
            Array2::from_shape_vec((n, n), flat).map_err(|e| MosaicError::InvalidSourceData {
                reason: e.to_string(),
            })?;

        Ok(Self { colors })
    }

    /// Matrix filled with a single color
    pub fn uniform(n: usize, color: Rgb) -> Self {
        Self {
            colors: Array2::from_elem((n, n), color),
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.colors.nrows()
    }

    /// Color at `(row, col)`, if in range
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        self.colors.get((row, col)).copied()
    }

    /// Underlying color array
    pub const fn colors(&self) -> &Array2<Rgb> {
        &self.colors
    }
}
