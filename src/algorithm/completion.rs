//! Completion detection over the grid model

use crate::spatial::grid::MosaicGrid;

/// Whether no cell of the grid is empty
///
/// Pure query; called at the start of every scheduling tick.
pub fn is_complete(grid: &MosaicGrid) -> bool {
    grid.is_complete()
}

/// Fill progress snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillProgress {
    /// Filled cells
    pub filled: usize,
    /// Total cells
    pub total: usize,
}

impl FillProgress {
    /// Take a snapshot of the grid
    pub fn of(grid: &MosaicGrid) -> Self {
        Self {
            filled: grid.filled_count(),
            total: grid.len(),
        }
    }

    /// Cells still waiting for a candidate
    pub const fn remaining(&self) -> usize {
        self.total.saturating_sub(self.filled)
    }

    /// Whether nothing remains to fill
    pub const fn is_complete(&self) -> bool {
        self.filled >= self.total
    }

    /// Filled share in `[0, 1]`; an empty grid counts as done
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.filled as f64 / self.total as f64
        }
    }
}
