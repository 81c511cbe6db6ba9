//! Command-line interface for matrix decomposition and image segmentation

use crate::decompose::decompose;
use crate::flow::segment;
use crate::io::configuration::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_WRAP_WIDTH, OUTPUT_SUFFIX,
    SUPPORTED_EXTENSIONS,
};
use crate::io::display::{render_decomposition, render_matrix};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::{export_mask, load_intensities};
use crate::io::matrix_file::load_matrix;
use crate::io::progress::ProgressManager;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Parser)]
#[command(name = "permcut")]
#[command(
    author,
    version,
    about = "Birkhoff-von Neumann decomposition and min-cut image segmentation"
)]
pub struct Cli {
    /// Which operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// The operations exposed by the tool
#[derive(Subcommand)]
pub enum Command {
    /// Decompose an equal-line-sum matrix into weighted permutation matrices
    Decompose {
        /// Text file containing a whitespace-separated integer matrix
        #[arg(value_name = "MATRIX")]
        matrix: PathBuf,

        /// Maximum rendered line width before wrapping terms
        #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH)]
        wrap: usize,
    },

    /// Segment grayscale images into foreground and background masks
    Segment {
        /// Image file or directory to process
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Output path (single input file only; defaults to <input>_mask.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum image width before downscaling
        #[arg(short = 'w', long, default_value_t = DEFAULT_MAX_WIDTH)]
        width: u32,

        /// Maximum image height before downscaling
        #[arg(short = 'H', long, default_value_t = DEFAULT_MAX_HEIGHT)]
        height: u32,

        /// Process files even if output exists
        #[arg(short, long)]
        no_skip: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Run the selected subcommand
///
/// # Errors
///
/// Propagates validation, algorithm, and I/O errors from the selected
/// operation.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Decompose { matrix, wrap } => run_decompose(&matrix, wrap),
        Command::Segment {
            target,
            output,
            width,
            height,
            no_skip,
            quiet,
        } => {
            let config = SegmentConfig {
                target,
                output,
                max_width: width,
                max_height: height,
                skip_existing: !no_skip,
                quiet,
            };
            FileProcessor::new(config).process()
        }
    }
}

fn run_decompose(matrix_path: &Path, wrap: usize) -> Result<()> {
    let matrix = load_matrix(matrix_path)?;
    let decomposition = decompose(&matrix)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", render_matrix(&matrix))?;
    writeln!(stdout, "=")?;
    writeln!(stdout, "{}", render_decomposition(&decomposition, wrap))?;
    Ok(())
}

/// Options for a segmentation run
pub struct SegmentConfig {
    /// Image file or directory to process
    pub target: PathBuf,
    /// Explicit output path, valid only for a single input file
    pub output: Option<PathBuf>,
    /// Maximum image width before downscaling
    pub max_width: u32,
    /// Maximum image height before downscaling
    pub max_height: u32,
    /// Skip inputs whose output already exists
    pub skip_existing: bool,
    /// Suppress progress output
    pub quiet: bool,
}

/// Orchestrates segmentation of one file or a directory of images
pub struct FileProcessor {
    config: SegmentConfig,
    progress: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a processor for the given configuration
    pub const fn new(config: SegmentConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Segment every collected file and write its mask
    ///
    /// # Errors
    ///
    /// Returns an error when target validation, image loading, segmentation,
    /// or mask export fails; remaining files are not processed.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }
        if self.config.output.is_some() && files.len() > 1 {
            return Err(invalid_parameter(
                "output",
                &files.len(),
                &"explicit output path requires a single input file",
            ));
        }

        if !self.config.quiet {
            self.progress = Some(ProgressManager::new(files.len()));
        }

        for file in &files {
            let output = self.output_path(file);
            if self.config.skip_existing && output.exists() {
                if let Some(progress) = &self.progress {
                    progress.complete_file();
                }
                continue;
            }

            if let Some(progress) = &self.progress {
                progress.start_file(file);
            }

            let intensities =
                load_intensities(file, self.config.max_width, self.config.max_height)?;
            let segmentation = segment(&intensities)?;
            export_mask(&segmentation.foreground, &output)?;

            if let Some(progress) = &self.progress {
                progress.complete_file();
            }
        }

        if let Some(progress) = &self.progress {
            progress.finish();
        }
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.config.target;
        if target.is_file() {
            return Ok(vec![target.clone()]);
        }
        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"path does not exist",
            ));
        }

        let entries = fs::read_dir(target).map_err(|source| AlgorithmError::FileSystem {
            path: target.clone(),
            operation: "read directory",
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| AlgorithmError::FileSystem {
                    path: target.clone(),
                    operation: "read directory entry",
                    source,
                })?
                .path();
            if !path.is_file() {
                continue;
            }
            let supported = path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| {
                    SUPPORTED_EXTENSIONS
                        .iter()
                        .any(|candidate| extension.eq_ignore_ascii_case(candidate))
                });
            // Previously generated masks are not inputs
            let is_mask = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));
            if supported && !is_mask {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        if let Some(output) = &self.config.output {
            return output.clone();
        }
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.png"))
    }
}
