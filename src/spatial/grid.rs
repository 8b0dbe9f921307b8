//! Grid model: fixed target colors with write-once fill state
//!
//! Cells are stored row-major. A bit mask mirrors which cells are filled so
//! that completion checks and empty-cell scans don't walk the source array.

use crate::analysis::target::TargetColorMatrix;
use crate::io::error::{MosaicError, Result};
use crate::math::color::Rgb;
use crate::spatial::cell::{CellView, SourceRef};
use bitvec::vec::BitVec;
use ndarray::Array2;
use std::collections::HashMap;

/// Square mosaic grid
///
/// Target colors never change after construction. Each cell moves from
/// empty to filled at most once and is never cleared.
#[derive(Debug, Clone)]
pub struct MosaicGrid {
    targets: TargetColorMatrix,
    sources: Array2<Option<SourceRef>>,
    filled: BitVec,
    source_usage: HashMap<SourceRef, usize>,
}

impl MosaicGrid {
    /// Create a grid of empty cells over the given target colors
    pub fn new(targets: TargetColorMatrix) -> Self {
        let n = targets.size();
        Self {
            targets,
            sources: Array2::from_elem((n, n), None),
            filled: BitVec::repeat(false, n * n),
            source_usage: HashMap::new(),
        }
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.targets.size()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.filled.len()
    }

    /// Whether the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.filled.count_ones()
    }

    /// Whether every cell is filled
    pub fn is_complete(&self) -> bool {
        self.filled.all()
    }

    /// Target colors of the grid
    pub const fn targets(&self) -> &TargetColorMatrix {
        &self.targets
    }

    /// State of the cell at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn cell(&self, row: usize, col: usize) -> Result<CellView<'_>> {
        let target = self.target(row, col)?;
        let source = self.sources.get((row, col)).and_then(Option::as_ref);
        Ok(CellView { target, source })
    }

    /// Target color of the cell at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn target(&self, row: usize, col: usize) -> Result<Rgb> {
        self.targets
            .get(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Fill the cell at `(row, col)` with `source`
    ///
    /// Returns `Ok(false)` without touching the cell if it was already filled.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn assign(&mut self, row: usize, col: usize, source: &SourceRef) -> Result<bool> {
        let index = self.index_of(row, col)?;
        if self.filled.get(index).is_some_and(|bit| *bit) {
            return Ok(false);
        }

        let slot = self
            .sources
            .get_mut((row, col))
            .ok_or_else(|| MosaicError::CellOutOfBounds {
                row,
                col,
                size: self.targets.size(),
            })?;
        *slot = Some(source.clone());
        self.filled.set(index, true);
        *self.source_usage.entry(source.clone()).or_insert(0) += 1;

        Ok(true)
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        self.filled
            .iter_zeros()
            .filter_map(move |index| index.checked_div(n).map(|row| (row, index % n)))
    }

    /// Whether `source` fills at least one cell
    pub fn contains_source(&self, source: &SourceRef) -> bool {
        self.source_usage.contains_key(source)
    }

    /// Number of cells filled by `source`
    pub fn source_usage(&self, source: &SourceRef) -> usize {
        self.source_usage.get(source).copied().unwrap_or(0)
    }

    /// All cell sources in row-major order
    pub const fn sources(&self) -> &Array2<Option<SourceRef>> {
        &self.sources
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        let n = self.size();
        if row < n && col < n {
            Ok(row * n + col)
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> MosaicError {
        MosaicError::CellOutOfBounds {
            row,
            col,
            size: self.size(),
        }
    }
}
