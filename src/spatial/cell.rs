//! Per-cell values: source references, cell views and assignment events

use crate::math::color::Rgb;
use std::fmt;
use std::sync::Arc;

/// Opaque, cheaply cloned identifier of the candidate that filled a cell
///
/// Typically a path or URL the presentation layer can load again.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceRef(Arc<str>);

impl SourceRef {
    /// Create a reference from any string-like value
    pub fn new(reference: impl AsRef<str>) -> Self {
        Self(Arc::from(reference.as_ref()))
    }

    /// Borrow the reference text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for SourceRef {
    fn from(reference: String) -> Self {
        Self(Arc::from(reference))
    }
}

impl AsRef<str> for SourceRef {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView<'a> {
    /// Fixed target color
    pub target: Rgb,
    /// Candidate that filled the cell, if any
    pub source: Option<&'a SourceRef>,
}

impl CellView<'_> {
    /// Whether a candidate has been assigned
    pub const fn is_filled(&self) -> bool {
        self.source.is_some()
    }
}

/// A cell being filled by a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Candidate that now fills the cell
    pub source: SourceRef,
    /// Dominant color of the candidate
    pub color: Rgb,
}
