//! Rasterization of partition trees
//!
//! Leaves are painted in pre-order; internal nodes are never painted.
//! Outlines are opt-in through [`RenderConfig`].

use tracing::debug;

use crate::raster::{PixelGrid, Rgb};
use crate::tree::{QuadNode, Region};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Draw a one-pixel border around every leaf.
    pub draw_outlines: bool,
    /// Border color.
    pub outline_color: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            draw_outlines: false,
            outline_color: Rgb::BLACK,
        }
    }
}

impl RenderConfig {
    /// Enable or disable leaf outlines.
    pub fn with_outlines(mut self, enabled: bool) -> Self {
        self.draw_outlines = enabled;
        self
    }

    /// Set the outline color.
    pub fn with_outline_color(mut self, color: Rgb) -> Self {
        self.outline_color = color;
        self
    }
}

/// Paint every leaf's color over its region in `sink`.
pub fn rasterize(root: &QuadNode, sink: &mut PixelGrid, config: &RenderConfig) {
    let mut painted = 0usize;
    for leaf in root.leaves() {
        sink.fill_region(&leaf.region(), leaf.color());
        painted += 1;
    }
    if config.draw_outlines {
        draw_outlines(root, sink, config.outline_color);
    }
    debug!(leaves = painted, outlines = config.draw_outlines, "rasterized quadtree");
}

/// Render a tree into a fresh grid the size of its root region.
pub fn render(root: &QuadNode, config: &RenderConfig) -> PixelGrid {
    let region = root.region();
    let mut grid = PixelGrid::new(region.right(), region.bottom());
    rasterize(root, &mut grid, config);
    grid
}

/// Overlay leaf outlines on an existing image without repainting leaves.
pub fn visualize(root: &QuadNode, canvas: &mut PixelGrid, config: &RenderConfig) {
    draw_outlines(root, canvas, config.outline_color);
}

fn draw_outlines(root: &QuadNode, canvas: &mut PixelGrid, color: Rgb) {
    for leaf in root.leaves() {
        draw_rectangle(canvas, &leaf.region(), color);
    }
}

/// One-pixel border along the inside edge of `region`.
fn draw_rectangle(canvas: &mut PixelGrid, region: &Region, color: Rgb) {
    if region.is_empty() {
        return;
    }
    let last_x = region.right() - 1;
    let last_y = region.bottom() - 1;
    for x in region.x..region.right() {
        canvas.set(x, region.y, color);
        canvas.set(x, last_y, color);
    }
    for y in region.y..region.bottom() {
        canvas.set(region.x, y, color);
        canvas.set(last_x, y, color);
    }
}
