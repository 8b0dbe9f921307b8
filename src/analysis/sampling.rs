//! Nearest-neighbour resampling into square color grids

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::math::color::Rgb;
use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array2;

/// Resample an image into a `dim` x `dim` grid of colors
///
/// Each output cell takes exactly one source pixel, so every returned color
/// exists in the input. Rows follow image y, columns follow image x.
///
/// # Errors
///
/// Returns an error if:
/// - `dim` is zero
/// - The image has zero width or height
pub fn sample_nearest(image: &RgbImage, dim: usize) -> Result<Array2<Rgb>> {
    if dim == 0 {
        return Err(invalid_parameter(
            "dimension",
            &dim,
            &"sampling grid needs at least one cell",
        ));
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(MosaicError::DegenerateImage { width, height });
    }

    let side = u32::try_from(dim).map_err(|e| invalid_parameter("dimension", &dim, &e))?;

    let thumbnail = imageops::resize(image, side, side, FilterType::Nearest);

    let mut grid = Array2::from_elem((dim, dim), Rgb::BLACK);
    for (x, y, pixel) in thumbnail.enumerate_pixels() {
        if let Some(cell) = grid.get_mut((y as usize, x as usize)) {
            *cell = Rgb::from(*pixel);
        }
    }

    Ok(grid)
}
