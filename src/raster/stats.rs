//! Region statistics.
//!
//! Statistics are derived from integer channel sums so that every source
//! produces bit-identical means and deviations for the same pixels.

use super::{PixelGrid, Rgb, CHANNELS};
use crate::tree::Region;

/// Per-channel mean and population standard deviation over a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStats {
    /// Channel means.
    pub mean: [f64; CHANNELS],
    /// Channel standard deviations (divisor `N`).
    pub stddev: [f64; CHANNELS],
    color: Rgb,
}

impl BlockStats {
    /// Derive statistics from `count` samples with the given channel sums
    /// and sums of squares.
    pub fn from_sums(count: u64, sums: [u64; CHANNELS], squares: [u64; CHANNELS]) -> Self {
        let mut mean = [0.0; CHANNELS];
        let mut stddev = [0.0; CHANNELS];
        let mut color = [0u8; CHANNELS];
        if count == 0 {
            return Self {
                mean,
                stddev,
                color: Rgb(color),
            };
        }

        let n = count as u128;
        for c in 0..CHANNELS {
            let s = sums[c] as u128;
            let q = squares[c] as u128;
            mean[c] = sums[c] as f64 / count as f64;
            // n * q >= s^2 by Cauchy-Schwarz
            let spread = (n * q).saturating_sub(s * s);
            stddev[c] = (spread as f64).sqrt() / count as f64;
            color[c] = (s / n).min(u8::MAX as u128) as u8;
        }

        Self {
            mean,
            stddev,
            color: Rgb(color),
        }
    }

    /// Channel means truncated to 8 bits.
    pub fn mean_color(&self) -> Rgb {
        self.color
    }

    /// `true` when any channel deviates by more than `threshold`.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.stddev.iter().any(|&sd| sd > threshold)
    }
}

/// Anything the partitioner can query for dimensions and region statistics.
pub trait ImageSource {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Mean and standard deviation of the pixels in `region`.
    fn block_stats(&self, region: &Region) -> BlockStats;

    /// Region covering the whole image.
    fn bounds(&self) -> Region {
        Region::new(0, 0, self.width(), self.height())
    }
}

/// Summed-area tables over a [`PixelGrid`].
///
/// Stores, for every channel, the running sum and sum of squares of the
/// rectangle from the origin to each position, so any region's statistics
/// cost four lookups per table.
#[derive(Debug, Clone)]
pub struct IntegralStats {
    width: u32,
    height: u32,
    /// Row stride of the tables (`width + 1`).
    stride: usize,
    sums: [Vec<u64>; CHANNELS],
    squares: [Vec<u64>; CHANNELS],
}

impl IntegralStats {
    /// Build tables from a pixel grid.
    pub fn new(grid: &PixelGrid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let stride = width as usize + 1;
        let cells = stride * (height as usize + 1);
        let mut sums: [Vec<u64>; CHANNELS] = std::array::from_fn(|_| vec![0u64; cells]);
        let mut squares: [Vec<u64>; CHANNELS] = std::array::from_fn(|_| vec![0u64; cells]);

        let raw = grid.as_raw();
        for y in 0..height as usize {
            let mut row_sum = [0u64; CHANNELS];
            let mut row_sq = [0u64; CHANNELS];
            for x in 0..width as usize {
                let base = (y * width as usize + x) * CHANNELS;
                let idx = (y + 1) * stride + (x + 1);
                let above = y * stride + (x + 1);
                for c in 0..CHANNELS {
                    let v = raw[base + c] as u64;
                    row_sum[c] += v;
                    row_sq[c] += v * v;
                    sums[c][idx] = row_sum[c] + sums[c][above];
                    squares[c][idx] = row_sq[c] + squares[c][above];
                }
            }
        }

        Self {
            width,
            height,
            stride,
            sums,
            squares,
        }
    }

    fn rect(&self, table: &[u64], region: &Region) -> u64 {
        let x0 = region.x as usize;
        let y0 = region.y as usize;
        let x1 = region.right().min(self.width) as usize;
        let y1 = region.bottom().min(self.height) as usize;
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }
        let at = |x: usize, y: usize| table[y * self.stride + x];
        at(x1, y1) + at(x0, y0) - at(x0, y1) - at(x1, y0)
    }
}

impl ImageSource for IntegralStats {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn block_stats(&self, region: &Region) -> BlockStats {
        let sums = std::array::from_fn(|c| self.rect(&self.sums[c], region));
        let squares = std::array::from_fn(|c| self.rect(&self.squares[c], region));
        BlockStats::from_sums(region.area(), sums, squares)
    }
}
