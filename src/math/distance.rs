//! Red-weighted perceptual color distance and tolerance matching
//!
//! Uses the "redmean" approximation: the red and blue contributions are
//! weighted by the mean red level of the two colors, green carries a fixed
//! heavier weight since the eye is most sensitive to it.

use crate::io::error::{Result, invalid_parameter};
use crate::math::color::Rgb;

/// Squared redmean distance between two colors
///
/// Symmetric in its arguments and zero for identical colors.
pub fn redmean_distance_squared(first: Rgb, second: Rgb) -> f64 {
    let r_mean = (f64::from(first.r) + f64::from(second.r)) / 2.0;
    let dr = f64::from(first.r) - f64::from(second.r);
    let dg = f64::from(first.g) - f64::from(second.g);
    let db = f64::from(first.b) - f64::from(second.b);

    (2.0 + r_mean / 256.0) * dr * dr
        + 4.0 * dg * dg
        + (2.0 + (255.0 - r_mean) / 256.0) * db * db
}

/// Redmean distance between two colors
pub fn redmean_distance(first: Rgb, second: Rgb) -> f64 {
    redmean_distance_squared(first, second).sqrt()
}

/// Tolerance-bounded color comparison
///
/// The tolerance is fixed for a whole run; comparisons happen against its
/// square so no square root is taken per cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatcher {
    tolerance: f64,
    threshold: f64,
}

impl ColorMatcher {
    /// Create a matcher accepting distances up to `tolerance`
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or not finite
    pub fn new(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(invalid_parameter(
                "tolerance",
                &tolerance,
                &"must be a finite, non-negative number",
            ));
        }

        Ok(Self {
            tolerance,
            threshold: tolerance * tolerance,
        })
    }

    /// Matcher that only accepts identical colors
    pub const fn exact() -> Self {
        Self {
            tolerance: 0.0,
            threshold: 0.0,
        }
    }

    /// Configured tolerance
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether two colors lie within tolerance of each other
    pub fn matches(&self, first: Rgb, second: Rgb) -> bool {
        redmean_distance_squared(first, second) <= self.threshold
    }
}
