//! `.qtc` bitstream codec
//!
//! A stream is a header (width, height, structure length), a packed block of
//! structure bits (one per node, pre-order, `true` = leaf) and one 3-byte
//! color record per leaf in the same order. Node geometry is never stored:
//! the decoder re-derives every region from the image dimensions with the
//! same split rule the partitioner uses. The leaf count is implicit in the
//! structure bits.
//!
//! There is no magic number, version or checksum, and integers use the
//! native byte order, so streams round-trip on one platform only.

mod bits;
mod decode;
mod encode;
mod header;

pub use bits::{BitReader, BitWriter};
pub use decode::DecodedStream;
pub use header::{ByteCursor, StreamHeader, COLOR_BYTES, HEADER_BYTES};

use crate::tree::{QuadNode, Region};
use thiserror::Error;

/// How the decoder treats a structure block that runs out before the tree
/// is complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Bits past the end read as `false` (internal). An internal bit on a
    /// region that cannot be split is taken as a leaf, which keeps the
    /// recursion bounded; a short color section still fails.
    ///
    /// A stream that ran out of bits is indistinguishable from one that
    /// really describes these nodes, so this mode can turn a truncated file
    /// into a plausible but wrong image.
    #[default]
    Permissive,
    /// Running out of structure bits, or an internal bit on an
    /// unsplittable region, is a format error.
    Strict,
}

/// Decoder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Handling of exhausted structure bits.
    pub truncation: TruncationPolicy,
}

impl CodecConfig {
    /// Reject truncated or inconsistent structure blocks.
    pub fn strict() -> Self {
        Self {
            truncation: TruncationPolicy::Strict,
        }
    }

    /// Set the truncation policy.
    pub fn with_truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.truncation = truncation;
        self
    }
}

/// Errors produced while encoding or decoding a stream.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Stream ends before the width, height and length fields.
    #[error("corrupt stream: header truncated")]
    TruncatedHeader,

    /// Header declares a non-positive dimension.
    #[error("corrupt stream: invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Declared width.
        width: i32,
        /// Declared height.
        height: i32,
    },

    /// Structure length exceeds the bytes that follow the header.
    #[error("corrupt stream: structure block declares {declared} bytes, {available} available")]
    TruncatedStructure {
        /// Length from the header.
        declared: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// Color section ends before every leaf has a record.
    #[error("corrupt stream: missing color record for leaf {leaf_index}")]
    TruncatedColors {
        /// Zero-based pre-order index of the leaf.
        leaf_index: usize,
    },

    /// Structure bits ran out (strict decoding only).
    #[error("corrupt stream: structure bits exhausted at node {node_index}")]
    StructureExhausted {
        /// Zero-based pre-order index of the node.
        node_index: usize,
    },

    /// Internal bit on a region that cannot be split (strict decoding only).
    #[error("corrupt stream: node {node_index} marks unsplittable region {region} as internal")]
    UnsplittableRegion {
        /// Zero-based pre-order index of the node.
        node_index: usize,
        /// Region of the node.
        region: Region,
    },

    /// Header dimensions differ from the caller's.
    #[error("stream is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        /// Width the caller declared.
        expected_width: u32,
        /// Height the caller declared.
        expected_height: u32,
        /// Width in the header.
        actual_width: u32,
        /// Height in the header.
        actual_height: u32,
    },

    /// Dimension does not fit the header's signed field.
    #[error("dimensions {width}x{height} exceed the header range")]
    DimensionOverflow {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Node region is not the one the split rule assigns to it.
    #[error("node region {actual} does not match expected region {expected}")]
    RegionMismatch {
        /// Image region for the root, split quadrant for a child.
        expected: Region,
        /// Region the node actually carries.
        actual: Region,
    },

    /// Tree has an internal node over a region the split rule never divides.
    #[error("internal node {node_index} covers unsplittable region {region}")]
    UnsplittableNode {
        /// Zero-based pre-order index of the node.
        node_index: usize,
        /// Region of the node.
        region: Region,
    },
}

impl CodecError {
    /// `true` for errors caused by malformed input bytes.
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(
            self,
            CodecError::TruncatedHeader
                | CodecError::InvalidDimensions { .. }
                | CodecError::TruncatedStructure { .. }
                | CodecError::TruncatedColors { .. }
                | CodecError::StructureExhausted { .. }
                | CodecError::UnsplittableRegion { .. }
        )
    }
}

/// Encoder/decoder entry points.
#[derive(Debug, Clone, Default)]
pub struct TreeCodec {
    config: CodecConfig,
}

impl TreeCodec {
    /// Create a codec with the given decoder configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Decoder configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serialize a tree whose root covers `(0, 0, width, height)`.
    pub fn encode(root: &QuadNode, width: u32, height: u32) -> Result<Vec<u8>, CodecError> {
        encode::encode_tree(root, width, height)
    }

    /// Decode a stream, confirming its header matches `width` x `height`.
    pub fn decode(&self, bytes: &[u8], width: u32, height: u32) -> Result<QuadNode, CodecError> {
        let decoded = self.decode_stream(bytes)?;
        if decoded.width != width || decoded.height != height {
            return Err(CodecError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                actual_width: decoded.width,
                actual_height: decoded.height,
            });
        }
        Ok(decoded.root)
    }

    /// Decode a stream, taking the dimensions from its header.
    pub fn decode_stream(&self, bytes: &[u8]) -> Result<DecodedStream, CodecError> {
        decode::decode_stream(bytes, &self.config)
    }
}
