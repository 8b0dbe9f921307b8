//! Candidate reduction to a single dominant color
//!
//! The candidate is resampled into a small thumbnail and the most frequent
//! exact color wins. Taking the mode rather than the mean keeps the chosen
//! color one that actually appears in the candidate.

use crate::analysis::sampling::sample_nearest;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::math::color::Rgb;
use image::RgbImage;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Frequency count of exact colors
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    counts: HashMap<Rgb, u32>,
    total: u32,
}

impl ColorHistogram {
    /// Count every color produced by `pixels`
    pub fn from_pixels<I>(pixels: I) -> Self
    where
        I: IntoIterator<Item = Rgb>,
    {
        let mut histogram = Self::default();
        for color in pixels {
            histogram.add(color);
        }
        histogram
    }

    /// Record one sample
    pub fn add(&mut self, color: Rgb) {
        *self.counts.entry(color).or_insert(0) += 1;
        self.total += 1;
    }

    /// Occurrences of `color`
    pub fn count(&self, color: Rgb) -> u32 {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Total number of samples
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Number of distinct colors
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Most frequent color and its count
    ///
    /// Ties go to the lexicographically smallest `(r, g, b)` triple so the
    /// result never depends on hash iteration order.
    pub fn dominant(&self) -> Option<(Rgb, u32)> {
        self.counts
            .iter()
            .max_by_key(|&(&color, &count)| (count, Reverse(color)))
            .map(|(&color, &count)| (color, count))
    }
}

/// Reduces candidate images to their dominant color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorReducer {
    inner_resolution: usize,
    min_dominance: f64,
}

impl ColorReducer {
    /// Create a reducer sampling a `inner_resolution` x `inner_resolution` thumbnail
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is zero
    pub fn new(inner_resolution: usize) -> Result<Self> {
        if inner_resolution == 0 {
            return Err(invalid_parameter(
                "inner_resolution",
                &inner_resolution,
                &"thumbnail needs at least one pixel",
            ));
        }

        Ok(Self {
            inner_resolution,
            min_dominance: 0.0,
        })
    }

    /// Require the dominant color to cover at least this share of samples
    ///
    /// # Errors
    ///
    /// Returns an error if the share is outside `[0, 1]`
    pub fn with_min_dominance(mut self, share: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&share) {
            return Err(invalid_parameter(
                "min_dominance",
                &share,
                &"must be a fraction between 0 and 1",
            ));
        }
        self.min_dominance = share;
        Ok(self)
    }

    /// Thumbnail side length
    pub const fn inner_resolution(&self) -> usize {
        self.inner_resolution
    }

    /// Histogram of the candidate's thumbnail
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn histogram(&self, image: &RgbImage) -> Result<ColorHistogram> {
        let thumbnail = sample_nearest(image, self.inner_resolution)?;
        Ok(ColorHistogram::from_pixels(thumbnail.iter().copied()))
    }

    /// Dominant color of the candidate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image has no pixels
    /// - The most frequent color falls below the configured minimum share
    pub fn reduce(&self, image: &RgbImage) -> Result<Rgb> {
        let histogram = self.histogram(image)?;
        let (color, count) = histogram.dominant().ok_or(MosaicError::DegenerateImage {
            width: image.width(),
            height: image.height(),
        })?;

        let share = f64::from(count) / f64::from(histogram.total());
        if share < self.min_dominance {
            return Err(MosaicError::NoDominantColor {
                share,
                required: self.min_dominance,
            });
        }

        Ok(color)
    }
}

/// Dominant color of `image` sampled at `inner_resolution`
///
/// # Errors
///
/// Returns an error if the resolution is zero or the image has no pixels
pub fn reduce_to_dominant(image: &RgbImage, inner_resolution: usize) -> Result<Rgb> {
    ColorReducer::new(inner_resolution)?.reduce(image)
}
