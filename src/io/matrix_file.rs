//! Loading whitespace-separated integer matrices from text files

use std::fs;
use std::path::Path;

use ndarray::Array2;

use crate::io::error::{AlgorithmError, Result};

/// Load a matrix from a text file
///
/// Each non-empty line is one row of whitespace-separated integers; lines
/// starting with `#` are comments. All rows must have the same length. An
/// empty file parses as a 0x0 matrix.
///
/// # Errors
///
/// Returns [`AlgorithmError::FileSystem`] when the file cannot be read and
/// [`AlgorithmError::MatrixParse`] on malformed contents, naming the line.
pub fn load_matrix(path: &Path) -> Result<Array2<i64>> {
    let contents = fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;
    parse_matrix(&contents, path)
}

fn parse_matrix(contents: &str, path: &Path) -> Result<Array2<i64>> {
    let parse_error = |line: usize, reason: String| AlgorithmError::MatrixParse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut entries = Vec::new();
    let mut row_count = 0;
    let mut width = None;

    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut row_width = 0;
        for token in trimmed.split_whitespace() {
            let value: i64 = token
                .parse()
                .map_err(|_| parse_error(line_number, format!("invalid integer '{token}'")))?;
            entries.push(value);
            row_width += 1;
        }

        match width {
            None => width = Some(row_width),
            Some(expected) if expected != row_width => {
                return Err(parse_error(
                    line_number,
                    format!("row has {row_width} entries, expected {expected}"),
                ));
            }
            Some(_) => {}
        }
        row_count += 1;
    }

    let cols = width.unwrap_or(0);
    Array2::from_shape_vec((row_count, cols), entries)
        .map_err(|err| parse_error(0, format!("inconsistent shape: {err}")))
}
