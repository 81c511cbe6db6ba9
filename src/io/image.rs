//! Grayscale image loading and mask export

use std::fs;
use std::path::Path;

use image::{ImageBuffer, Luma};
use ndarray::Array2;

use crate::io::error::{AlgorithmError, Result};

/// Load an image as a row-major grid of grayscale intensities
///
/// Color inputs are converted to luma. Images larger than the given bounds
/// are downscaled to fit while preserving aspect ratio, keeping the flow
/// network a tractable size.
///
/// # Errors
///
/// Returns [`AlgorithmError::ImageLoad`] when the file cannot be opened or
/// decoded.
pub fn load_intensities(path: &Path, max_width: u32, max_height: u32) -> Result<Array2<i64>> {
    let loaded = image::open(path).map_err(|source| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let bounded = if loaded.width() > max_width || loaded.height() > max_height {
        loaded.thumbnail(max_width, max_height)
    } else {
        loaded
    };

    let gray = bounded.to_luma8();
    let (width, height) = gray.dimensions();
    let mut intensities = Array2::zeros((height as usize, width as usize));
    for (x, y, pixel) in gray.enumerate_pixels() {
        if let Some(slot) = intensities.get_mut([y as usize, x as usize]) {
            *slot = i64::from(pixel.0[0]);
        }
    }
    Ok(intensities)
}

/// Export a segmentation mask as a grayscale PNG
///
/// Foreground pixels render black and background pixels white. Parent
/// directories are created as needed.
///
/// # Errors
///
/// Returns [`AlgorithmError::FileSystem`] when the parent directory cannot
/// be created and [`AlgorithmError::ImageExport`] when encoding fails.
pub fn export_mask(mask: &Array2<bool>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }
    }

    let (rows, cols) = mask.dim();
    let rendered = ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| {
        let foreground = mask.get([y as usize, x as usize]).copied().unwrap_or(false);
        Luma([if foreground { 0u8 } else { 255 }])
    });

    rendered
        .save(path)
        .map_err(|source| AlgorithmError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}
