use super::{BlockStats, ImageSource, RasterError, Rgb, CHANNELS};
use crate::tree::Region;

/// Owned row-major grid of 3-channel samples.
///
/// Serves as the image source for partitioning and as the sink that
/// rasterization paints into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Create a black grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create a black grid, failing instead of aborting when the buffer
    /// cannot be sized or allocated.
    pub fn try_new(width: u32, height: u32) -> Result<Self, RasterError> {
        let too_large = || RasterError::TooLarge { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or_else(too_large)?;
        let mut samples = Vec::new();
        samples.try_reserve_exact(len).map_err(|_| too_large())?;
        samples.resize(len, 0);
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a grid where every pixel has `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let pixels = width as usize * height as usize;
        let mut samples = Vec::with_capacity(pixels * CHANNELS);
        for _ in 0..pixels {
            samples.extend_from_slice(&color.0);
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// Wrap an interleaved `width * height * 3` byte buffer.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * CHANNELS;
        if samples.len() != expected {
            return Err(RasterError::BufferSize {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y).0);
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// Grid width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Region covering the whole grid.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Interleaved sample bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the grid, returning its sample bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        let offset = self.offset(x, y)?;
        let mut channels = [0u8; CHANNELS];
        channels.copy_from_slice(&self.samples[offset..offset + CHANNELS]);
        Some(Rgb(channels))
    }

    /// Overwrite the pixel at `(x, y)`; coordinates outside the grid are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(offset) = self.offset(x, y) {
            self.samples[offset..offset + CHANNELS].copy_from_slice(&color.0);
        }
    }

    /// Paint `region` (clipped to the grid) with a solid color.
    pub fn fill_region(&mut self, region: &Region, color: Rgb) {
        let x_end = region.right().min(self.width);
        let y_end = region.bottom().min(self.height);
        for y in region.y..y_end {
            for x in region.x..x_end {
                self.set(x, y, color);
            }
        }
    }

    /// Sums and sums of squares per channel over `region`.
    pub(crate) fn region_sums(&self, region: &Region) -> ([u64; CHANNELS], [u64; CHANNELS]) {
        let mut sums = [0u64; CHANNELS];
        let mut squares = [0u64; CHANNELS];
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                let Some(offset) = self.offset(x, y) else {
                    continue;
                };
                for c in 0..CHANNELS {
                    let v = self.samples[offset + c] as u64;
                    sums[c] += v;
                    squares[c] += v * v;
                }
            }
        }
        (sums, squares)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }
}

impl ImageSource for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn block_stats(&self, region: &Region) -> BlockStats {
        let (sums, squares) = self.region_sums(region);
        BlockStats::from_sums(region.area(), sums, squares)
    }
}
