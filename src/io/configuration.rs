//! Runtime configuration defaults and output settings

// Display settings
/// Maximum rendered line width before decomposition terms wrap
pub const DEFAULT_WRAP_WIDTH: usize = 120;

// Image settings; larger inputs are downscaled before building the network
/// Default maximum image width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 600;
/// Default maximum image height in pixels
pub const DEFAULT_MAX_HEIGHT: u32 = 400;

// Output settings
/// Suffix added to segmentation output filenames
pub const OUTPUT_SUFFIX: &str = "_mask";

/// Image extensions accepted during directory processing
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pgm", "pbm"];
