//! Hopcroft-Karp maximum matching on the bipartite graph of nonzero entries
//!
//! Row indices form one part and column indices the other, with an edge
//! wherever the matrix entry is nonzero. The layered BFS plus augmenting DFS
//! finds a maximum matching, which for a matrix with equal nonzero line sums
//! is always perfect; callers assert perfection and treat a shortfall as an
//! internal defect.

use std::collections::VecDeque;

use ndarray::Array2;
use num_traits::PrimInt;

/// A matching between row nodes and column nodes
#[derive(Debug, Clone)]
pub struct Matching {
    pair_for_row: Vec<Option<usize>>,
    pair_for_col: Vec<Option<usize>>,
    size: usize,
}

impl Matching {
    /// Number of matched row/column pairs
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Check whether no pairs were matched
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Check whether every row node and every column node is covered
    pub fn is_perfect(&self) -> bool {
        self.size == self.pair_for_row.len() && self.size == self.pair_for_col.len()
    }

    /// Iterate over matched `(row, column)` pairs in row order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pair_for_row
            .iter()
            .enumerate()
            .filter_map(|(row, &col)| col.map(|c| (row, c)))
    }
}

/// Build row-to-column adjacency lists from the nonzero entries of a matrix
pub fn adjacency_from_matrix<T: PrimInt>(matrix: &Array2<T>) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); matrix.nrows()];
    for ((row, col), &value) in matrix.indexed_iter() {
        if value != T::zero() {
            if let Some(list) = adjacency.get_mut(row) {
                list.push(col);
            }
        }
    }
    adjacency
}

/// Compute a maximum bipartite matching with Hopcroft-Karp
///
/// `adjacency` maps each row node to the column nodes it may match;
/// `col_count` is the size of the column part. Runs in O(E sqrt(V)).
pub fn maximum_matching(adjacency: &[Vec<usize>], col_count: usize) -> Matching {
    let row_count = adjacency.len();
    let mut pair_for_row: Vec<Option<usize>> = vec![None; row_count];
    let mut pair_for_col: Vec<Option<usize>> = vec![None; col_count];
    let mut dist: Vec<Option<u32>> = vec![None; row_count];
    let mut size = 0;

    while layer_distances(adjacency, &pair_for_row, &pair_for_col, &mut dist) {
        for row in 0..row_count {
            if pair_for_row.get(row).copied().flatten().is_none()
                && augment(row, adjacency, &mut pair_for_row, &mut pair_for_col, &mut dist)
            {
                size += 1;
            }
        }
    }

    Matching {
        pair_for_row,
        pair_for_col,
        size,
    }
}

// BFS from the free row nodes, layering rows by alternating-path length.
// Returns true when some free column is reachable, i.e. an augmenting path
// exists for this phase.
fn layer_distances(
    adjacency: &[Vec<usize>],
    pair_for_row: &[Option<usize>],
    pair_for_col: &[Option<usize>],
    dist: &mut [Option<u32>],
) -> bool {
    let mut queue = VecDeque::new();
    for (row, (pairing, layer)) in pair_for_row.iter().zip(dist.iter_mut()).enumerate() {
        if pairing.is_none() {
            *layer = Some(0);
            queue.push_back(row);
        } else {
            *layer = None;
        }
    }

    let mut reachable_free_column = false;
    while let Some(row) = queue.pop_front() {
        let Some(row_dist) = dist.get(row).copied().flatten() else {
            continue;
        };
        for &col in adjacency.get(row).map(Vec::as_slice).unwrap_or(&[]) {
            match pair_for_col.get(col).copied().flatten() {
                None => reachable_free_column = true,
                Some(next_row) => {
                    if let Some(layer) = dist.get_mut(next_row) {
                        if layer.is_none() {
                            *layer = Some(row_dist + 1);
                            queue.push_back(next_row);
                        }
                    }
                }
            }
        }
    }

    reachable_free_column
}

// DFS along layered alternating paths; on success flips the path's pairings.
// Dead-end rows are pruned by clearing their layer so later searches in the
// same phase skip them.
fn augment(
    row: usize,
    adjacency: &[Vec<usize>],
    pair_for_row: &mut [Option<usize>],
    pair_for_col: &mut [Option<usize>],
    dist: &mut [Option<u32>],
) -> bool {
    let row_dist = dist.get(row).copied().flatten();

    for &col in adjacency.get(row).map(Vec::as_slice).unwrap_or(&[]) {
        let extend = match pair_for_col.get(col).copied().flatten() {
            None => true,
            Some(next_row) => {
                dist.get(next_row).copied().flatten() == row_dist.map(|d| d + 1)
                    && augment(next_row, adjacency, pair_for_row, pair_for_col, dist)
            }
        };
        if extend {
            if let Some(slot) = pair_for_row.get_mut(row) {
                *slot = Some(col);
            }
            if let Some(slot) = pair_for_col.get_mut(col) {
                *slot = Some(row);
            }
            return true;
        }
    }

    if let Some(layer) = dist.get_mut(row) {
        *layer = None;
    }
    false
}
