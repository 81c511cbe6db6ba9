//! Iterative extraction of weighted permutation matrices
//!
//! Demonstrates the constructive step of the Birkhoff-von Neumann theorem for
//! integer matrices: a square nonnegative matrix with equal row and column
//! sums is a weighted sum of permutation matrices. Each iteration matches
//! rows to columns through the nonzero entries, subtracts the largest
//! feasible multiple of the corresponding permutation matrix, and repeats
//! until the remainder vanishes. The line sum strictly decreases every step,
//! so the loop terminates after at most line-sum iterations.

use ndarray::Array2;
use num_traits::{PrimInt, Signed};

use crate::decompose::{matching, matrix};
use crate::io::error::{AlgorithmError, Result};

/// One extracted term: a positive multiplier and a permutation matrix
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionTerm<T> {
    /// How many copies of the permutation matrix this term contributes
    pub multiplier: T,
    /// A 0/1 matrix with exactly one 1 per row and per column
    pub permutation: Array2<T>,
}

/// An ordered sequence of terms whose weighted sum equals the input matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition<T> {
    dimension: usize,
    terms: Vec<DecompositionTerm<T>>,
}

impl<T: PrimInt> Decomposition<T> {
    /// Dimension of the decomposed matrix
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// The extracted terms in extraction order
    pub fn terms(&self) -> &[DecompositionTerm<T>] {
        &self.terms
    }

    /// Number of extracted terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the decomposition has no terms (zero input matrix)
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum `multiplier * permutation` over all terms
    ///
    /// For a decomposition produced by [`decompose`] this reproduces the
    /// input matrix exactly.
    pub fn reconstruct(&self) -> Array2<T> {
        let mut total = Array2::zeros((self.dimension, self.dimension));
        for term in &self.terms {
            for (slot, &entry) in total.iter_mut().zip(term.permutation.iter()) {
                *slot = *slot + entry * term.multiplier;
            }
        }
        total
    }
}

impl<T> IntoIterator for Decomposition<T> {
    type Item = DecompositionTerm<T>;
    type IntoIter = std::vec::IntoIter<DecompositionTerm<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

/// Decompose a matrix into weighted permutation matrices
///
/// The input must be square with nonnegative entries and equal row and
/// column sums. Each iteration builds the bipartite graph of nonzero
/// entries, extracts a perfect matching, and subtracts the largest multiple
/// of the matched permutation matrix that keeps the remainder nonnegative
/// (the minimum remainder entry over the matched positions).
///
/// The function holds no global state and is safe to call concurrently on
/// different matrices.
///
/// # Errors
///
/// - [`AlgorithmError::InvalidMatrix`] when the input violates a
///   precondition; no terms are returned.
/// - [`AlgorithmError::NoPerfectMatching`] when a remainder's bipartite
///   graph cannot cover every row and column. This is unreachable for a
///   valid input and indicates an internal defect.
pub fn decompose<T: PrimInt + Signed>(input: &Array2<T>) -> Result<Decomposition<T>> {
    matrix::line_sum(input)?;

    let n = input.nrows();
    let mut remainder = input.clone();
    let mut terms = Vec::new();
    let mut iteration = 0;

    while !matrix::is_zero(&remainder) {
        let adjacency = matching::adjacency_from_matrix(&remainder);
        let matched = matching::maximum_matching(&adjacency, n);
        if !matched.is_perfect() {
            return Err(AlgorithmError::NoPerfectMatching {
                iteration,
                matched: matched.len(),
                required: n,
            });
        }

        // The matching only touches nonzero entries, so the minimum over the
        // matched positions is a positive multiplier.
        let Some(multiplier) = matched
            .pairs()
            .filter_map(|(row, col)| remainder.get([row, col]).copied())
            .min()
        else {
            return Err(AlgorithmError::NoPerfectMatching {
                iteration,
                matched: matched.len(),
                required: n,
            });
        };

        let mut permutation = Array2::zeros((n, n));
        for (row, col) in matched.pairs() {
            if let Some(slot) = permutation.get_mut([row, col]) {
                *slot = T::one();
            }
            if let Some(entry) = remainder.get_mut([row, col]) {
                *entry = *entry - multiplier;
            }
        }

        terms.push(DecompositionTerm {
            multiplier,
            permutation,
        });
        iteration += 1;
    }

    Ok(Decomposition {
        dimension: n,
        terms,
    })
}
