//! Candidate acquisition seam and an in-memory source

use crate::io::error::{Result, unavailable};
use crate::math::color::Rgb;
use crate::spatial::cell::SourceRef;
use async_trait::async_trait;
use image::RgbImage;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// A decoded candidate image and where it came from
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Decoded raster
    pub image: RgbImage,
    /// Stable identifier for later display
    pub source: SourceRef,
}

impl Candidate {
    /// Pair an image with its source reference
    pub fn new(image: RgbImage, source: impl Into<SourceRef>) -> Self {
        Self {
            image,
            source: source.into(),
        }
    }

    /// Uniformly colored square candidate
    pub fn solid(color: Rgb, side: u32, source: impl Into<SourceRef>) -> Self {
        Self::new(
            RgbImage::from_pixel(side, side, color.into()),
            source,
        )
    }
}

/// Supplier of candidate images
///
/// Every call is one independent attempt; an error only discards that
/// attempt and the scheduler retries on its next tick.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Acquire one candidate
    ///
    /// # Errors
    ///
    /// Returns an acquisition error when no usable image is available, or a
    /// reduction-class error when the fetched bytes cannot be decoded
    async fn acquire(&self) -> Result<Candidate>;
}

/// Source handing out a fixed queue of candidates in order
///
/// Reports the candidate as unavailable once the queue runs dry.
#[derive(Debug, Default)]
pub struct QueueSource {
    queue: Mutex<VecDeque<Result<Candidate>>>,
}

impl QueueSource {
    /// Source over the given candidates
    pub fn new(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        Self::from_results(candidates.into_iter().map(Ok))
    }

    /// Source replaying successes and failures in order
    pub fn from_results(results: impl IntoIterator<Item = Result<Candidate>>) -> Self {
        Self {
            queue: Mutex::new(results.into_iter().collect()),
        }
    }

    /// Append a candidate to the back of the queue
    pub fn push(&self, candidate: Candidate) {
        self.lock().push_back(Ok(candidate));
    }

    /// Candidates still queued
    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Candidate>>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CandidateSource for QueueSource {
    async fn acquire(&self) -> Result<Candidate> {
        let next = self.lock().pop_front();
        next.unwrap_or_else(|| Err(unavailable(&"candidate queue is exhausted")))
    }
}
