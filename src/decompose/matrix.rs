//! Line-sum validation for decomposition input matrices
//!
//! The decomposition precondition is structural: the matrix must be square,
//! every entry nonnegative, and every row and column must sum to the same
//! value. Validation reports the first violated invariant rather than a
//! generic failure so callers can locate bad data.

use ndarray::Array2;
use num_traits::{PrimInt, Signed};

use crate::io::error::{MatrixViolation, Result, invalid_matrix};

// Sums are accumulated in i64 so narrow entry types cannot overflow mid-check
fn widen<T: PrimInt>(value: T) -> i64 {
    value.to_i64().unwrap_or(i64::MAX)
}

/// Validate the decomposition precondition and return the common line sum
///
/// Checks squareness, entry nonnegativity, and row/column sum equality in
/// that order. The line sum of an empty (0x0) matrix is zero.
///
/// # Errors
///
/// Returns [`crate::AlgorithmError::InvalidMatrix`] naming the first violated
/// invariant: non-square shape, a negative entry, or a row or column whose
/// sum differs from row 0's.
pub fn line_sum<T: PrimInt + Signed>(matrix: &Array2<T>) -> Result<i64> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(invalid_matrix(MatrixViolation::NotSquare { rows, cols }));
    }

    for ((row, col), &value) in matrix.indexed_iter() {
        if value < T::zero() {
            return Err(invalid_matrix(MatrixViolation::NegativeEntry {
                row,
                col,
                value: widen(value),
            }));
        }
    }

    let line_sum = matrix
        .rows()
        .into_iter()
        .next()
        .map_or(0, |row| row.iter().map(|&v| widen(v)).sum());

    for (row, values) in matrix.rows().into_iter().enumerate() {
        let sum: i64 = values.iter().map(|&v| widen(v)).sum();
        if sum != line_sum {
            return Err(invalid_matrix(MatrixViolation::RowSumMismatch {
                row,
                sum,
                line_sum,
            }));
        }
    }

    for (column, values) in matrix.columns().into_iter().enumerate() {
        let sum: i64 = values.iter().map(|&v| widen(v)).sum();
        if sum != line_sum {
            return Err(invalid_matrix(MatrixViolation::ColumnSumMismatch {
                column,
                sum,
                line_sum,
            }));
        }
    }

    Ok(line_sum)
}

/// Check whether every entry of the matrix is zero
pub fn is_zero<T: PrimInt>(matrix: &Array2<T>) -> bool {
    matrix.iter().all(|&value| value == T::zero())
}
