//! Progress display for batch segmentation runs

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks progress across a batch of files
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress bar sized to the number of files
    pub fn new(file_count: usize) -> Self {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar }
    }

    /// Show the file currently being processed
    pub fn start_file(&self, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(display_name);
    }

    /// Mark the current file as done
    pub fn complete_file(&self) {
        self.bar.inc(1);
    }

    /// Clear the display after the batch finishes
    pub fn finish(&self) {
        self.bar.finish_with_message("All files processed");
    }
}
