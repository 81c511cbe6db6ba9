//! Validates the decomposition against its structural guarantees

use ndarray::{Array2, array};
use permcut::decompose::{Decomposition, decompose};
use permcut::{AlgorithmError, MatrixViolation};

fn line_sum_of(matrix: &Array2<i64>) -> i64 {
    matrix.rows().into_iter().next().map_or(0, |row| row.sum())
}

// Checks every guarantee the decomposition makes: exact reconstruction,
// term count bounded by the line sum, valid permutation matrices, positive
// multipliers, and a remainder that never goes negative.
fn assert_valid_decomposition(input: &Array2<i64>, decomposition: &Decomposition<i64>) {
    assert_eq!(decomposition.reconstruct(), *input);
    assert!(decomposition.len() as i64 <= line_sum_of(input));

    let n = input.nrows();
    let mut remainder = input.clone();
    for term in decomposition.terms() {
        assert!(term.multiplier > 0);

        for row in term.permutation.rows() {
            assert_eq!(row.sum(), 1);
            assert!(row.iter().all(|&entry| entry == 0 || entry == 1));
        }
        for column in term.permutation.columns() {
            assert_eq!(column.sum(), 1);
        }
        assert_eq!(term.permutation.dim(), (n, n));

        remainder = remainder - &(term.permutation.mapv(|entry| entry * term.multiplier));
        assert!(
            remainder.iter().all(|&entry| entry >= 0),
            "remainder went negative after subtracting a term"
        );
    }
    assert!(remainder.iter().all(|&entry| entry == 0));
}

#[test]
fn test_line_sum_five_matrix() {
    let input = array![[1i64, 3, 1, 0], [3, 1, 0, 1], [0, 1, 1, 3], [1, 0, 3, 1]];
    let Ok(decomposition) = decompose(&input) else {
        unreachable!("Matrix satisfies the precondition");
    };
    assert!(decomposition.len() <= 5);
    assert_valid_decomposition(&input, &decomposition);
}

#[test]
fn test_latin_square_style_matrix() {
    let input = array![[1i64, 2, 3, 0], [0, 3, 2, 1], [2, 0, 1, 3], [3, 1, 0, 2]];
    let Ok(decomposition) = decompose(&input) else {
        unreachable!("Matrix satisfies the precondition");
    };
    assert_valid_decomposition(&input, &decomposition);
}

#[test]
fn test_near_identity_matrix() {
    // One valid decomposition is 4 copies of the identity plus 1 copy of the
    // permutation swapping columns 0<->2 and 1<->3; any exact decomposition
    // within the term bound is acceptable
    let input = array![[4i64, 0, 1, 0], [0, 1, 0, 4], [1, 0, 4, 0], [0, 4, 0, 1]];
    let Ok(decomposition) = decompose(&input) else {
        unreachable!("Matrix satisfies the precondition");
    };
    assert!(decomposition.len() <= 5);
    assert_valid_decomposition(&input, &decomposition);
}

#[test]
fn test_single_entry_matrix() {
    let input = array![[7i64]];
    let Ok(decomposition) = decompose(&input) else {
        unreachable!("Matrix satisfies the precondition");
    };
    assert_eq!(decomposition.len(), 1);
    assert_valid_decomposition(&input, &decomposition);
}

#[test]
fn test_zero_matrix_yields_empty_decomposition() {
    let input = Array2::<i64>::zeros((4, 4));
    let Ok(decomposition) = decompose(&input) else {
        unreachable!("Zero matrix satisfies the precondition");
    };
    assert!(decomposition.is_empty());
    assert_eq!(decomposition.reconstruct(), input);
}

#[test]
fn test_scaled_identity() {
    let input = Array2::<i64>::from_diag_elem(5, 9);
    let Ok(decomposition) = decompose(&input) else {
        unreachable!("Matrix satisfies the precondition");
    };
    assert_eq!(decomposition.len(), 1);
    assert_eq!(decomposition.terms().first().map(|t| t.multiplier), Some(9));
    assert_valid_decomposition(&input, &decomposition);
}

#[test]
fn test_non_square_matrix_rejected() {
    let input = array![[1i64, 2], [2, 1], [0, 0]];
    assert!(matches!(
        decompose(&input),
        Err(AlgorithmError::InvalidMatrix {
            violation: MatrixViolation::NotSquare { rows: 3, cols: 2 }
        })
    ));
}

#[test]
fn test_negative_entry_rejected() {
    let input = array![[2i64, -1], [-1, 2]];
    assert!(matches!(
        decompose(&input),
        Err(AlgorithmError::InvalidMatrix {
            violation: MatrixViolation::NegativeEntry {
                row: 0,
                col: 1,
                value: -1
            }
        })
    ));
}

#[test]
fn test_unequal_row_sums_rejected() {
    let input = array![[1i64, 1], [2, 2]];
    assert!(matches!(
        decompose(&input),
        Err(AlgorithmError::InvalidMatrix {
            violation: MatrixViolation::RowSumMismatch { row: 1, .. }
        })
    ));
}

#[test]
fn test_unequal_column_sums_rejected() {
    let input = array![[1i64, 2], [1, 2]];
    assert!(matches!(
        decompose(&input),
        Err(AlgorithmError::InvalidMatrix {
            violation: MatrixViolation::ColumnSumMismatch { column: 0, .. }
        })
    ));
}

#[test]
fn test_generic_entry_types() {
    let input = array![[2i32, 1], [1, 2]];
    let Ok(decomposition) = decompose(&input) else {
        unreachable!("Matrix satisfies the precondition");
    };
    assert_eq!(decomposition.reconstruct(), input);
}

#[test]
fn test_concurrent_calls_do_not_interfere() {
    let handles: Vec<_> = (1i64..=4)
        .map(|scale| {
            std::thread::spawn(move || {
                let input = array![
                    [scale, 3 * scale, scale, 0],
                    [3 * scale, scale, 0, scale],
                    [0, scale, scale, 3 * scale],
                    [scale, 0, 3 * scale, scale]
                ];
                decompose(&input).map(|decomposition| decomposition.reconstruct() == input)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().ok().and_then(|r| r.ok()), Some(true));
    }
}
