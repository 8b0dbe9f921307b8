//! Photomosaic assembly by dominant-color matching
//!
//! A target image is reduced to a fixed grid of colors. Candidate images are
//! then acquired one per tick, reduced to their most frequent color, and
//! greedily assigned to empty cells whose target color lies within a
//! perceptual tolerance, until every cell is filled.

#![forbid(unsafe_code)]

/// Fill scheduling, assignment scans and completion detection
pub mod algorithm;
/// Target extraction and candidate color reduction
pub mod analysis;
/// Input/output: candidate sources, configuration, errors, CLI and export
pub mod io;
/// Color representation and perceptual distance
pub mod math;
/// Grid model and per-cell values
pub mod spatial;

pub use algorithm::scheduler::{FillScheduler, FillState, RunSummary};
pub use io::error::{MosaicError, Result};
pub use io::source::{Candidate, CandidateSource};
pub use math::color::Rgb;
pub use spatial::cell::SourceRef;
pub use spatial::grid::MosaicGrid;
