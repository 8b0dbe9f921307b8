//! Greedy assignment scan of one candidate over the empty cells

use crate::math::color::Rgb;
use crate::math::distance::ColorMatcher;
use crate::spatial::cell::{Assignment, SourceRef};
use crate::spatial::grid::MosaicGrid;

/// How many cells one candidate may claim in a single scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Stop after the first matching cell
    Single,
    /// Claim every matching empty cell
    Repeat,
}

impl RepeatPolicy {
    /// Policy for the `allow_repeats` configuration flag
    pub const fn from_allow_repeats(allow_repeats: bool) -> Self {
        if allow_repeats {
            Self::Repeat
        } else {
            Self::Single
        }
    }
}

/// Assign `source` to empty cells whose target color matches `color`
///
/// Cells are visited row-major. The caller must hold exclusive access to the
/// grid for the whole scan; every empty check is immediately followed by its
/// set with no other writer in between.
pub fn assign_candidate(
    grid: &mut MosaicGrid,
    color: Rgb,
    source: &SourceRef,
    matcher: &ColorMatcher,
    policy: RepeatPolicy,
) -> Vec<Assignment> {
    let limit = match policy {
        RepeatPolicy::Single => 1,
        RepeatPolicy::Repeat => usize::MAX,
    };

    let matching: Vec<(usize, usize)> = grid
        .empty_cells()
        .filter(|&(row, col)| {
            grid.target(row, col)
                .is_ok_and(|target| matcher.matches(target, color))
        })
        .take(limit)
        .collect();

    let mut assignments = Vec::new();
    for (row, col) in matching {
        if let Ok(true) = grid.assign(row, col, source) {
            assignments.push(Assignment {
                row,
                col,
                source: source.clone(),
                color,
            });
        }
    }

    assignments
}
