//! Owned quadtree node
//!
//! Each internal node exclusively owns a boxed array of four children, so
//! dropping the root releases the whole subtree.

use std::fmt;

use super::Region;
use crate::raster::Rgb;

/// Node of the partition tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadNode {
    region: Region,
    color: Rgb,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    /// Create a leaf covering `region`.
    pub fn leaf(region: Region, color: Rgb) -> Self {
        Self {
            region,
            color,
            children: None,
        }
    }

    /// Create an internal node owning four children in quadrant order.
    pub fn internal(region: Region, color: Rgb, children: [QuadNode; 4]) -> Self {
        Self {
            region,
            color,
            children: Some(Box::new(children)),
        }
    }

    /// Footprint of this node.
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Representative color (mean of the covered pixels when built from an
    /// image; black for internal nodes produced by decoding).
    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Children in top-left, top-right, bottom-left, bottom-right order.
    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        self.children.as_deref()
    }
}

impl fmt::Display for QuadNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "leaf {} {}", self.region, self.color)
        } else {
            write!(f, "node {}", self.region)
        }
    }
}
