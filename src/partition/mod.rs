//! Region partitioning
//!
//! Recursively subdivides an image into near-uniform rectangles, driven by
//! per-region color statistics.

mod builder;
mod config;

pub use builder::PartitionBuilder;
pub use config::{PartitionConfig, DEFAULT_THRESHOLD};

use crate::tree::Region;
use thiserror::Error;

/// Errors raised before construction starts.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Threshold is negative, NaN or infinite.
    #[error("threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),

    /// Region has zero width or height.
    #[error("cannot partition empty region {0}")]
    EmptyRegion(Region),

    /// Region extends past the image.
    #[error("region {region} lies outside image bounds {bounds}")]
    OutOfBounds {
        /// Requested region.
        region: Region,
        /// Image extent.
        bounds: Region,
    },
}
