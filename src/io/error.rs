//! Error types and failure classification for mosaic assembly

use std::fmt;
use std::path::PathBuf;

/// Coarse classification used to decide whether a failure is recoverable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Candidate could not be obtained from its source
    Acquisition,
    /// Candidate was obtained but no dominant color could be derived
    Reduction,
    /// Grid coordinate outside the grid
    Index,
    /// Rejected configuration or malformed input data
    Configuration,
    /// Filesystem or image encoding failure outside the fill loop
    Io,
}

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Candidate source had no usable image for this attempt
    CandidateUnavailable {
        /// Why the source could not supply a candidate
        reason: String,
    },

    /// Candidate bytes could not be read
    CandidateFetch {
        /// Location the candidate was read from
        location: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Candidate bytes could not be decoded into a raster image
    CandidateDecode {
        /// Source reference of the candidate
        reference: String,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Image has no pixels to sample
    DegenerateImage {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// Most frequent thumbnail color is too rare to represent the image
    NoDominantColor {
        /// Share of samples held by the most frequent color
        share: f64,
        /// Minimum share required
        required: f64,
    },

    /// Grid coordinate outside `0..size`
    CellOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid side length
        size: usize,
    },

    /// Source data doesn't meet mosaic requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl MosaicError {
    /// Classify this error
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::CandidateUnavailable { .. } | Self::CandidateFetch { .. } => {
                FailureKind::Acquisition
            }
            Self::CandidateDecode { .. }
            | Self::DegenerateImage { .. }
            | Self::NoDominantColor { .. } => FailureKind::Reduction,
            Self::CellOutOfBounds { .. } => FailureKind::Index,
            Self::InvalidSourceData { .. } | Self::InvalidParameter { .. } => {
                FailureKind::Configuration
            }
            Self::ImageLoad { .. } | Self::ImageExport { .. } | Self::FileSystem { .. } => {
                FailureKind::Io
            }
        }
    }

    /// Whether the fill loop may discard the candidate and carry on
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::Acquisition | FailureKind::Reduction
        )
    }
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::CandidateUnavailable { reason } => {
                write!(f, "Candidate unavailable: {reason}")
            }
            Self::CandidateFetch { location, source } => {
                write!(
                    f,
                    "Failed to fetch candidate '{}': {source}",
                    location.display()
                )
            }
            Self::CandidateDecode { reference, source } => {
                write!(f, "Failed to decode candidate '{reference}': {source}")
            }
            Self::DegenerateImage { width, height } => {
                write!(f, "Image of size {width}x{height} has no pixels to sample")
            }
            Self::NoDominantColor { share, required } => {
                write!(
                    f,
                    "Most frequent color covers {:.1}% of samples (required {:.1}%)",
                    share * 100.0,
                    required * 100.0
                )
            }
            Self::CellOutOfBounds { row, col, size } => {
                write!(
                    f,
                    "Cell ({row}, {col}) is outside the {size}x{size} grid"
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. }
            | Self::ImageExport { source, .. }
            | Self::CandidateDecode { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::CandidateFetch { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a candidate-unavailable error
pub fn unavailable(reason: &impl ToString) -> MosaicError {
    MosaicError::CandidateUnavailable {
        reason: reason.to_string(),
    }
}
