//! Raster collaborators: pixel storage, region statistics and file I/O.
//!
//! The partitioner only needs an [`ImageSource`]: something with a width, a
//! height and per-region color statistics. [`PixelGrid`] is the owned
//! 3-channel buffer used both as a source and as the reconstruction sink;
//! [`IntegralStats`] answers the same statistics queries in O(1).

mod grid;
pub mod io;
mod pixel;
mod stats;

pub use grid::PixelGrid;
pub use pixel::Rgb;
pub use stats::{BlockStats, ImageSource, IntegralStats};

use thiserror::Error;

/// Number of channels per pixel sample.
pub const CHANNELS: usize = 3;

/// Errors raised while creating, loading or saving raster images.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Raw buffer length does not match `width * height * 3`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize {
        /// Bytes required by the declared dimensions.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// Image has a zero dimension.
    #[error("image is empty ({width}x{height})")]
    EmptyImage {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Pixel buffer for the dimensions cannot be allocated.
    #[error("cannot allocate a {width}x{height} image")]
    TooLarge {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Failure reported by the image codec backend.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}
