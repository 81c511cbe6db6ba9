//! Error types for decomposition, segmentation, and file operations

use std::fmt;
use std::path::PathBuf;

/// A violated precondition of the decomposition input matrix
///
/// The decomposition requires a square matrix of nonnegative integers whose
/// row sums and column sums all equal a common line sum. Each variant names
/// the specific invariant that failed, with enough context to locate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixViolation {
    /// Matrix dimensions differ
    NotSquare {
        /// Number of rows in the input
        rows: usize,
        /// Number of columns in the input
        cols: usize,
    },

    /// An entry is negative
    NegativeEntry {
        /// Row index of the offending entry
        row: usize,
        /// Column index of the offending entry
        col: usize,
        /// The offending value
        value: i64,
    },

    /// A row sum differs from the line sum
    RowSumMismatch {
        /// Index of the offending row
        row: usize,
        /// Sum of the offending row
        sum: i64,
        /// The expected common line sum (taken from row 0)
        line_sum: i64,
    },

    /// A column sum differs from the line sum
    ColumnSumMismatch {
        /// Index of the offending column
        column: usize,
        /// Sum of the offending column
        sum: i64,
        /// The expected common line sum (taken from row 0)
        line_sum: i64,
    },
}

impl fmt::Display for MatrixViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSquare { rows, cols } => {
                write!(f, "matrix is {rows}x{cols}, expected square")
            }
            Self::NegativeEntry { row, col, value } => {
                write!(f, "negative entry {value} at ({row}, {col})")
            }
            Self::RowSumMismatch { row, sum, line_sum } => {
                write!(f, "row {row} sums to {sum}, expected line sum {line_sum}")
            }
            Self::ColumnSumMismatch {
                column,
                sum,
                line_sum,
            } => {
                write!(
                    f,
                    "column {column} sums to {sum}, expected line sum {line_sum}"
                )
            }
        }
    }
}

/// Main error type for all algorithm operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Input matrix fails a decomposition precondition
    ///
    /// Reported before any term is extracted; no partial decomposition is
    /// returned.
    InvalidMatrix {
        /// The specific invariant that was violated
        violation: MatrixViolation,
    },

    /// The bipartite graph of a valid remainder admitted no perfect matching
    ///
    /// This cannot happen for an input satisfying the equal-line-sum
    /// precondition, so it signals a defect in graph construction or an
    /// earlier subtraction rather than a recoverable condition.
    NoPerfectMatching {
        /// Extraction iteration when the matching fell short
        iteration: usize,
        /// Number of row nodes the matching covered
        matched: usize,
        /// Matrix dimension the matching needed to cover
        required: usize,
    },

    /// A pixel intensity is outside the supported grayscale range
    IntensityOutOfRange {
        /// Row index of the offending pixel
        row: usize,
        /// Column index of the offending pixel
        col: usize,
        /// The offending intensity value
        value: i64,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a segmentation mask to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// A matrix text file could not be parsed
    MatrixParse {
        /// Path to the matrix file
        path: PathBuf,
        /// One-based line number where parsing failed
        line: usize,
        /// Description of what went wrong
        reason: String,
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

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMatrix { violation } => {
                write!(f, "Invalid matrix: {violation}")
            }
            Self::NoPerfectMatching {
                iteration,
                matched,
                required,
            } => {
                write!(
                    f,
                    "No perfect matching at iteration {iteration}: covered {matched} of {required} rows (internal invariant violated)"
                )
            }
            Self::IntensityOutOfRange { row, col, value } => {
                write!(
                    f,
                    "Pixel intensity {value} at ({row}, {col}) is outside 0..=255"
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::MatrixParse { path, line, reason } => {
                write!(
                    f,
                    "Failed to parse matrix file '{}' at line {line}: {reason}",
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid matrix error from a violation
pub const fn invalid_matrix(violation: MatrixViolation) -> AlgorithmError {
    AlgorithmError::InvalidMatrix { violation }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
