//! Foreground/background segmentation as a minimum cut on the pixel grid
//!
//! Each pixel becomes a network node joined to a shared source and sink.
//! The source arc carries the pixel's intensity and the sink arc its
//! complement, so dark pixels are cheap to separate from the source and
//! gravitate to the sink (foreground) side. Neighboring pixels are joined
//! in both directions by the absolute intensity difference, penalizing
//! cuts through smooth regions.

use ndarray::Array2;

use crate::flow::network::FlowNetwork;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};

/// Largest representable grayscale intensity
pub const INTENSITY_MAX: i64 = 255;

// Node layout: source, sink, then pixels in row-major order
const SOURCE: usize = 0;
const SINK: usize = 1;

/// A computed segmentation of a grayscale image
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Total capacity of the minimum cut (equals the max-flow value)
    pub cut_value: i64,
    /// True where a pixel landed on the sink (foreground) side of the cut
    pub foreground: Array2<bool>,
}

impl Segmentation {
    /// Number of pixels marked as foreground
    pub fn foreground_count(&self) -> usize {
        self.foreground.iter().filter(|&&bit| bit).count()
    }
}

/// Segment a grayscale intensity grid into foreground and background
///
/// Intensities must lie in `0..=INTENSITY_MAX`. Darker pixels are treated
/// as more likely foreground, matching the capacity assignment described in
/// the module docs. The mask is axis-aligned with the input grid.
///
/// # Errors
///
/// - [`AlgorithmError::InvalidParameter`] when the grid has no pixels.
/// - [`AlgorithmError::IntensityOutOfRange`] when an entry falls outside
///   the grayscale range.
pub fn segment(intensities: &Array2<i64>) -> Result<Segmentation> {
    let (rows, cols) = intensities.dim();
    if rows == 0 || cols == 0 {
        return Err(invalid_parameter(
            "intensities",
            &format!("{rows}x{cols}"),
            &"image has no pixels",
        ));
    }
    for ((row, col), &value) in intensities.indexed_iter() {
        if !(0..=INTENSITY_MAX).contains(&value) {
            return Err(AlgorithmError::IntensityOutOfRange { row, col, value });
        }
    }

    let pixel = |row: usize, col: usize| 2 + row * cols + col;
    let mut network = FlowNetwork::new(rows * cols + 2);

    for ((row, col), &value) in intensities.indexed_iter() {
        network.add_edge(SOURCE, pixel(row, col), value)?;
        network.add_edge(pixel(row, col), SINK, INTENSITY_MAX - value)?;
    }

    // Smoothness penalties between 4-connected neighbors, both directions
    for ((row, col), &value) in intensities.indexed_iter() {
        if let Some(&right) = intensities.get([row, col + 1]) {
            let penalty = (value - right).abs();
            network.add_edge(pixel(row, col), pixel(row, col + 1), penalty)?;
            network.add_edge(pixel(row, col + 1), pixel(row, col), penalty)?;
        }
        if let Some(&below) = intensities.get([row + 1, col]) {
            let penalty = (value - below).abs();
            network.add_edge(pixel(row, col), pixel(row + 1, col), penalty)?;
            network.add_edge(pixel(row + 1, col), pixel(row, col), penalty)?;
        }
    }

    let (cut_value, source_side) = network.min_cut(SOURCE, SINK)?;

    let mut foreground = Array2::from_elem((rows, cols), false);
    for ((row, col), slot) in foreground.indexed_iter_mut() {
        *slot = !source_side
            .get(pixel(row, col))
            .is_some_and(|bit| *bit);
    }

    Ok(Segmentation {
        cut_value,
        foreground,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_uniform_dark_image_is_all_foreground() {
        let intensities = Array2::<i64>::zeros((3, 3));
        let Ok(segmentation) = segment(&intensities) else {
            unreachable!("Uniform image is valid input");
        };
        assert_eq!(segmentation.cut_value, 0);
        assert_eq!(segmentation.foreground_count(), 9);
    }

    #[test]
    fn test_out_of_range_intensity_rejected() {
        let intensities = array![[0i64, 300]];
        assert!(matches!(
            segment(&intensities),
            Err(AlgorithmError::IntensityOutOfRange { col: 1, .. })
        ));
    }

    #[test]
    fn test_empty_image_rejected() {
        let intensities = Array2::<i64>::zeros((0, 5));
        assert!(segment(&intensities).is_err());
    }
}
