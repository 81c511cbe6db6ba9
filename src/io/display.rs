//! Text rendering of matrices and decompositions
//!
//! Pure presentation: everything renders to a `String` and leaves writing
//! to the caller. Decomposition terms are laid out side by side as
//! `k * P  +  k' * P'` blocks, wrapping to a fresh paragraph once a row of
//! blocks would exceed the wrap width.

use std::fmt::Display;

use ndarray::Array2;
use num_traits::PrimInt;

use crate::decompose::{Decomposition, DecompositionTerm};

// Connector placed between adjacent term blocks, on the multiplier line
const CONNECTOR: &str = "  +  ";

/// Render a matrix with space-separated, right-aligned entries
pub fn render_matrix<T: PrimInt + Display>(matrix: &Array2<T>) -> String {
    let entry_width = matrix
        .iter()
        .map(|value| value.to_string().len())
        .max()
        .unwrap_or(1);

    let mut lines = Vec::with_capacity(matrix.nrows());
    for row in matrix.rows() {
        let rendered: Vec<String> = row
            .iter()
            .map(|value| format!("{value:>entry_width$}"))
            .collect();
        lines.push(rendered.join(" "));
    }
    lines.join("\n")
}

/// Render a decomposition as wrapped rows of `multiplier * permutation` blocks
///
/// An empty decomposition (of the zero matrix) renders as `"0"`.
pub fn render_decomposition<T: PrimInt + Display>(
    decomposition: &Decomposition<T>,
    wrap_width: usize,
) -> String {
    if decomposition.is_empty() {
        return "0".to_string();
    }

    let blocks: Vec<Vec<String>> = decomposition.terms().iter().map(term_block).collect();

    let mut paragraphs = Vec::new();
    let mut row_start = 0;
    while row_start < blocks.len() {
        let mut row_end = row_start + 1;
        let mut row_width = block_width(blocks.get(row_start));
        while let Some(next) = blocks.get(row_end) {
            let next_width = next.iter().map(String::len).max().unwrap_or(0);
            if row_width + CONNECTOR.len() + next_width > wrap_width {
                break;
            }
            row_width += CONNECTOR.len() + next_width;
            row_end += 1;
        }
        paragraphs.push(join_blocks(
            blocks.get(row_start..row_end).unwrap_or(&[]),
            row_start > 0,
        ));
        row_start = row_end;
    }

    paragraphs.join("\n\n")
}

// A term renders as its multiplier line followed by the permutation rows,
// all padded to a common width.
fn term_block<T: PrimInt + Display>(term: &DecompositionTerm<T>) -> Vec<String> {
    let mut lines = vec![format!("{} *", term.multiplier)];
    lines.extend(render_matrix(&term.permutation).lines().map(String::from));

    let width = lines.iter().map(String::len).max().unwrap_or(0);
    for line in &mut lines {
        while line.len() < width {
            line.push(' ');
        }
    }
    lines
}

fn block_width(block: Option<&Vec<String>>) -> usize {
    block.map_or(0, |lines| {
        lines.iter().map(String::len).max().unwrap_or(0)
    })
}

// Stitch a row of blocks line by line; the `+` connector appears only on
// the multiplier line. Continuation paragraphs open with a leading `+`.
fn join_blocks(blocks: &[Vec<String>], continuation: bool) -> String {
    let line_count = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let spacer = " ".repeat(CONNECTOR.len());

    let mut lines = Vec::with_capacity(line_count);
    for line_index in 0..line_count {
        let mut line = String::new();
        if continuation {
            line.push_str(if line_index == 0 { "+ " } else { "  " });
        }
        for (position, block) in blocks.iter().enumerate() {
            if position > 0 {
                line.push_str(if line_index == 0 { CONNECTOR } else { &spacer });
            }
            let width = block.iter().map(String::len).max().unwrap_or(0);
            match block.get(line_index) {
                Some(text) => line.push_str(text),
                None => line.push_str(&" ".repeat(width)),
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
