//! Image file decoding and encoding via the `image` crate.

use std::path::Path;

use image::RgbImage;
use tracing::debug;

use super::{PixelGrid, RasterError};

/// Decode an image file into an RGB8 [`PixelGrid`].
///
/// Any alpha channel is discarded; grayscale inputs are expanded to three
/// channels.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<PixelGrid, RasterError> {
    let path = path.as_ref();
    let rgb = image::open(path)?.into_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyImage { width, height });
    }
    debug!(path = %path.display(), width, height, "decoded image");
    PixelGrid::from_raw(width, height, rgb.into_raw())
}

/// Encode `grid` to `path`; the format is chosen from the file extension.
pub fn save_image<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> Result<(), RasterError> {
    let path = path.as_ref();
    let expected = grid.as_raw().len();
    let buffer = RgbImage::from_raw(grid.width(), grid.height(), grid.as_raw().to_vec()).ok_or(
        RasterError::BufferSize {
            expected,
            actual: expected,
        },
    )?;
    buffer.save(path)?;
    debug!(path = %path.display(), width = grid.width(), height = grid.height(), "wrote image");
    Ok(())
}
