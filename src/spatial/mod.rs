//! Grid model and the values stored in its cells

/// Source references, cell views and assignment events
pub mod cell;
/// Square grid with write-once fill state
pub mod grid;

pub use grid::MosaicGrid;
