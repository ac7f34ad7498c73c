//! # Quadtree image partitioning and `.qtc` codec
//!
//! This library splits a raster image into a hierarchy of axis-aligned
//! regions of near-uniform color and serializes that hierarchy compactly.
//!
//! ## Core Algorithm
//!
//! 1. **Variance-driven split**: a region splits into four while any channel's
//!    standard deviation exceeds the threshold and it is at least 2x2
//! 2. **Floor/remainder geometry**: odd pixels go to the right/bottom children
//! 3. **Structure bits**: one bit per node in pre-order, no stored geometry
//! 4. **Leaf colors**: one 3-byte record per leaf, count implied by the bits
//!
//! Result: a stream of `header + ⌈nodes/8⌉ + 3·leaves` bytes
//!
//! ## Usage Example
//!
//! ```no_run
//! use quadcodec::{Compressor, PartitionConfig, RenderConfig, CodecConfig};
//! use quadcodec::raster::io::load_image;
//!
//! let grid = load_image("input.png")?;
//! let compressor = Compressor::new(PartitionConfig::new(10.0)?);
//! let compressed = compressor.compress(&grid)?;
//! let restored = compressor.decompress(
//!     &compressed.bytes,
//!     &RenderConfig::default(),
//!     &CodecConfig::default(),
//! )?;
//! assert_eq!(restored.width(), grid.width());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod codec;      // Structure-bit stream encode/decode
pub mod partition;  // Variance-driven region subdivision
pub mod raster;     // Pixel grids, region statistics, image files
pub mod render;     // Tree rasterization
pub mod tree;       // Region quadtree

// Re-exports for convenience
pub use codec::{CodecConfig, CodecError, DecodedStream, TreeCodec, TruncationPolicy};
pub use partition::{PartitionBuilder, PartitionConfig, PartitionError};
pub use raster::{ImageSource, PixelGrid, RasterError, Rgb};
pub use render::RenderConfig;
pub use tree::{count_leaves, QuadNode, Region, TreeSummary};

use thiserror::Error;
use tracing::info;

/// Errors surfaced by the high-level [`Compressor`].
#[derive(Error, Debug)]
pub enum QuadError {
    /// Invalid partition input
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// Malformed or inconsistent stream
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Image creation or file I/O failed
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Image has a zero dimension
    #[error("cannot compress empty image ({width}x{height})")]
    EmptyImage {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

/// Encoded image plus the facts a caller usually reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Leaves in the partition (one color record each).
    pub leaf_count: usize,
    /// Serialized `.qtc` stream.
    pub bytes: Vec<u8>,
}

/// Main compression orchestrator
///
/// Coordinates partitioning, encoding, decoding and rasterization.
#[derive(Debug, Clone)]
pub struct Compressor {
    config: PartitionConfig,
}

impl Compressor {
    /// Create a compressor with the given partition settings.
    pub fn new(config: PartitionConfig) -> Self {
        Self { config }
    }

    /// Partition settings in use.
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Build the partition tree for `grid`.
    pub fn partition(&self, grid: &PixelGrid) -> Result<QuadNode, QuadError> {
        if grid.width() == 0 || grid.height() == 0 {
            return Err(QuadError::EmptyImage {
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(PartitionBuilder::build_image(grid, &self.config)?)
    }

    /// Partition and encode `grid`.
    pub fn compress(&self, grid: &PixelGrid) -> Result<CompressedImage, QuadError> {
        let root = self.partition(grid)?;
        let leaf_count = count_leaves(&root);
        let bytes = TreeCodec::encode(&root, grid.width(), grid.height())?;
        info!(
            width = grid.width(),
            height = grid.height(),
            leaves = leaf_count,
            bytes = bytes.len(),
            "compressed image"
        );
        Ok(CompressedImage {
            width: grid.width(),
            height: grid.height(),
            leaf_count,
            bytes,
        })
    }

    /// Decode a stream and paint it into a new grid.
    pub fn decompress(
        &self,
        bytes: &[u8],
        render_config: &RenderConfig,
        codec_config: &CodecConfig,
    ) -> Result<PixelGrid, QuadError> {
        let decoded = TreeCodec::new(codec_config.clone()).decode_stream(bytes)?;
        let mut grid = PixelGrid::try_new(decoded.width, decoded.height)?;
        render::rasterize(&decoded.root, &mut grid, render_config);
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_image_compresses_to_single_leaf() {
        let grid = PixelGrid::filled(16, 9, Rgb::new(40, 80, 120));
        let compressor = Compressor::new(PartitionConfig::default());
        let compressed = compressor.compress(&grid).unwrap();

        assert_eq!(compressed.leaf_count, 1);
        assert_eq!(compressed.bytes.len(), codec::HEADER_BYTES + 1 + 3);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let grid = PixelGrid::new(0, 5);
        let compressor = Compressor::new(PartitionConfig::default());
        assert!(matches!(
            compressor.compress(&grid),
            Err(QuadError::EmptyImage { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_decompress_restores_uniform_image() {
        let grid = PixelGrid::filled(5, 7, Rgb::new(1, 2, 3));
        let compressor = Compressor::new(PartitionConfig::default());
        let compressed = compressor.compress(&grid).unwrap();
        let restored = compressor
            .decompress(&compressed.bytes, &RenderConfig::default(), &CodecConfig::default())
            .unwrap();
        assert_eq!(restored, grid);
    }
}
