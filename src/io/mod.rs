/// Command-line parsing and the run driver
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Directory-backed candidate source
pub mod directory;
/// Error types and failure classification
pub mod error;
/// Mosaic image export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Candidate source trait and in-memory source
pub mod source;
/// Fill-order animation capture
pub mod visualization;
