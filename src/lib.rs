//! Classical combinatorial procedures over integer grids
//!
//! Two independent pieces share a toolkit here: a constructive
//! Birkhoff-von Neumann decomposition that rewrites an equal-line-sum
//! integer matrix as a weighted sum of permutation matrices via repeated
//! perfect-matching extraction, and a foreground/background image
//! segmentation that solves a max-flow/min-cut problem on the pixel grid.
//! Both cores are pure functions; printing, plotting, and file handling
//! live in the presentation layer under [`io`].

#![forbid(unsafe_code)]

/// Birkhoff-von Neumann decomposition via perfect bipartite matching
pub mod decompose;
/// Max-flow/min-cut and grid-image segmentation
pub mod flow;
/// Input/output operations, presentation, and error handling
pub mod io;

pub use io::error::{AlgorithmError, MatrixViolation, Result};
