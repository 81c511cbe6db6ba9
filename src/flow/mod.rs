//! Max-flow/min-cut machinery and grid-image segmentation

/// Dinic max-flow and minimum-cut extraction
pub mod network;
/// Pixel-grid network construction and mask recovery
pub mod segment;

pub use network::FlowNetwork;
pub use segment::{INTENSITY_MAX, Segmentation, segment};
