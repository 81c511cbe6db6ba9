//! Birkhoff-von Neumann decomposition of equal-line-sum integer matrices

/// The extraction loop and its result types
pub mod driver;
/// Hopcroft-Karp bipartite matching over nonzero entries
pub mod matching;
/// Input validation and line-sum checks
pub mod matrix;

pub use driver::{Decomposition, DecompositionTerm, decompose};
