use tracing::{debug, trace};

use super::config::validate_threshold;
use super::{PartitionConfig, PartitionError};
use crate::raster::{ImageSource, IntegralStats, PixelGrid};
use crate::tree::{QuadNode, Region};

/// Variance-driven quadtree construction.
///
/// A region becomes a leaf unless some channel's standard deviation exceeds
/// the threshold *and* the region is at least 2x2; otherwise it splits into
/// four children per [`Region::split`] and each child is built recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionBuilder;

impl PartitionBuilder {
    /// Build the subtree covering `region` of `source`.
    ///
    /// Fails fast, before any recursion, when the region is empty, lies
    /// outside the source, or the threshold is negative or not finite.
    pub fn build<S: ImageSource + ?Sized>(
        source: &S,
        region: Region,
        threshold: f64,
    ) -> Result<QuadNode, PartitionError> {
        validate_threshold(threshold)?;
        if region.is_empty() {
            return Err(PartitionError::EmptyRegion(region));
        }
        let bounds = source.bounds();
        if !bounds.encloses(&region) {
            return Err(PartitionError::OutOfBounds { region, bounds });
        }

        let root = build_node(source, region, threshold);
        debug!(
            region = %region,
            threshold,
            leaves = crate::tree::count_leaves(&root),
            "built quadtree"
        );
        Ok(root)
    }

    /// Build the tree for an entire grid using `config`.
    pub fn build_image(
        grid: &PixelGrid,
        config: &PartitionConfig,
    ) -> Result<QuadNode, PartitionError> {
        if config.integral_stats {
            let integral = IntegralStats::new(grid);
            Self::build(&integral, grid.bounds(), config.threshold)
        } else {
            Self::build(grid, grid.bounds(), config.threshold)
        }
    }
}

fn build_node<S: ImageSource + ?Sized>(source: &S, region: Region, threshold: f64) -> QuadNode {
    let stats = source.block_stats(&region);
    let color = stats.mean_color();

    if stats.exceeds(threshold) && region.can_split() {
        trace!(region = %region, stddev = ?stats.stddev, "split");
        let children = region
            .split()
            .map(|child| build_node(source, child, threshold));
        QuadNode::internal(region, color, children)
    } else {
        QuadNode::leaf(region, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgb;

    #[test]
    fn single_pixel_is_leaf_at_zero_threshold() {
        let grid = PixelGrid::filled(1, 1, Rgb::new(7, 8, 9));
        let root = PartitionBuilder::build(&grid, grid.bounds(), 0.0).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.color(), Rgb::new(7, 8, 9));
    }

    #[test]
    fn thin_strip_never_splits() {
        let grid = PixelGrid::from_fn(9, 1, |x, _| Rgb::new(x as u8 * 25, 0, 0));
        let root = PartitionBuilder::build(&grid, grid.bounds(), 0.0).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.color(), Rgb::new(100, 0, 0));
    }

    #[test]
    fn empty_region_is_rejected() {
        let grid = PixelGrid::new(4, 4);
        let err = PartitionBuilder::build(&grid, Region::new(0, 0, 0, 4), 1.0).unwrap_err();
        assert!(matches!(err, PartitionError::EmptyRegion(_)));
    }

    #[test]
    fn out_of_bounds_region_is_rejected() {
        let grid = PixelGrid::new(4, 4);
        let err = PartitionBuilder::build(&grid, Region::new(2, 2, 3, 2), 1.0).unwrap_err();
        assert!(matches!(err, PartitionError::OutOfBounds { .. }));
    }

    #[test]
    fn sub_region_build_keeps_origin() {
        let grid = PixelGrid::from_fn(8, 8, |x, y| Rgb::new(((x + y) * 16) as u8, 0, 0));
        let region = Region::new(2, 4, 5, 3);
        let root = PartitionBuilder::build(&grid, region, 0.0).unwrap();
        assert_eq!(root.region(), region);
        let children = root.children().expect("gradient splits");
        assert_eq!(children[3].region(), Region::new(4, 5, 3, 2));
    }

    #[test]
    fn integral_and_direct_sources_agree() {
        let grid = PixelGrid::from_fn(23, 17, |x, y| {
            Rgb::new((x * x % 251) as u8, (y * 13 % 256) as u8, ((x ^ y) * 9 % 256) as u8)
        });
        let config = PartitionConfig::new(12.0).unwrap();
        let fast = PartitionBuilder::build_image(&grid, &config).unwrap();
        let slow =
            PartitionBuilder::build_image(&grid, &config.with_integral_stats(false)).unwrap();
        assert_eq!(fast, slow);
    }
}
