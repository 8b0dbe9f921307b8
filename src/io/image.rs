//! PNG export of a filled (or partially filled) mosaic

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::cell::SourceRef;
use crate::spatial::grid::MosaicGrid;
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::collections::HashMap;
use std::path::Path;

/// Counts of what went into an exported mosaic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Cells drawn from their candidate image
    pub tiles: usize,
    /// Cells painted with their target color instead
    pub placeholders: usize,
}

/// Load a tile image using the source reference as a filesystem path
pub fn load_tile_from_path(source: &SourceRef) -> Option<RgbImage> {
    match image::open(source.as_str()) {
        Ok(img) => Some(img.to_rgb8()),
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "Could not reload tile image");
            None
        }
    }
}

/// Composite the grid into one image of `tile_px` pixels per cell
///
/// Each source is loaded once through `load_tile`. Empty cells, and cells
/// whose source cannot be loaded, are painted with their target color.
///
/// # Errors
///
/// Returns an error if the tile size is zero or the canvas would not fit
/// in an image
pub fn render_mosaic<F>(
    grid: &MosaicGrid,
    tile_px: u32,
    mut load_tile: F,
) -> Result<(RgbImage, ExportReport)>
where
    F: FnMut(&SourceRef) -> Option<RgbImage>,
{
    if tile_px == 0 {
        return Err(invalid_parameter(
            "tile_px",
            &tile_px,
            &"tiles need at least one pixel",
        ));
    }

    let side = u32::try_from(grid.size())
        .ok()
        .and_then(|n| n.checked_mul(tile_px))
        .ok_or_else(|| {
            invalid_parameter(
                "tile_px",
                &tile_px,
                &format!("a {}-cell grid would overflow the canvas", grid.size()),
            )
        })?;

    let mut canvas = RgbImage::new(side, side);
    let mut tiles: HashMap<SourceRef, Option<RgbImage>> = HashMap::new();
    let mut report = ExportReport::default();

    for ((row, col), slot) in grid.sources().indexed_iter() {
        let x = i64::from(tile_px) * col as i64;
        let y = i64::from(tile_px) * row as i64;

        let tile = slot.as_ref().and_then(|source| {
            tiles
                .entry(source.clone())
                .or_insert_with(|| {
                    load_tile(source)
                        .filter(|img| img.width() > 0 && img.height() > 0)
                        .map(|img| imageops::resize(&img, tile_px, tile_px, FilterType::Triangle))
                })
                .clone()
        });

        if let Some(tile) = tile {
            imageops::replace(&mut canvas, &tile, x, y);
            report.tiles += 1;
        } else {
            let target = grid.target(row, col)?;
            let patch = RgbImage::from_pixel(tile_px, tile_px, target.into());
            imageops::replace(&mut canvas, &patch, x, y);
            report.placeholders += 1;
        }
    }

    Ok((canvas, report))
}

/// Render the grid and save it as an image file
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see [`render_mosaic`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_mosaic<F>(
    grid: &MosaicGrid,
    tile_px: u32,
    output_path: &Path,
    load_tile: F,
) -> Result<ExportReport>
where
    F: FnMut(&SourceRef) -> Option<RgbImage>,
{
    let (canvas, report) = render_mosaic(grid, tile_px, load_tile)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(
        path = %output_path.display(),
        tiles = report.tiles,
        placeholders = report.placeholders,
        "Exported mosaic"
    );

    Ok(report)
}
