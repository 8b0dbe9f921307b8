//! Color math for matching candidates to cells

/// RGB value type
pub mod color;
/// Redmean distance and tolerance matching
pub mod distance;
