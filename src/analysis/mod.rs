//! Color analysis of target and candidate images

/// Candidate reduction to a dominant color
pub mod reducer;
/// Nearest-neighbour resampling shared by both extractors
pub mod sampling;
/// Target image reduction to the grid's color matrix
pub mod target;
