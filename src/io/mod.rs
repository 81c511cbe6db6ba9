//! Input/output, presentation, and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Runtime constants and output settings
pub mod configuration;
/// Text rendering of matrices and decompositions
pub mod display;
/// Error types and the crate-wide `Result` alias
pub mod error;
/// Grayscale image loading and mask export
pub mod image;
/// Matrix text file loading
pub mod matrix_file;
/// Batch progress display
pub mod progress;
