//! Node footprints and the split rule
//!
//! Region = origin (x, y) + extent (width, height)
//! Children computed via floor/remainder split:
//!   halfW = ⌊width / 2⌋, offsetW = width mod 2 (same for height)
//!   Extra column/row always goes to the right/bottom children.

use std::fmt;

/// Child slot within a split region, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Origin corner.
    TopLeft = 0,
    /// Right of the vertical cut, above the horizontal cut.
    TopRight = 1,
    /// Left of the vertical cut, below the horizontal cut.
    BottomLeft = 2,
    /// Opposite the origin corner.
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in the fixed child order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Position within a child array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned rectangle covered by a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Region {
    /// Left column (inclusive).
    pub x: u32,
    /// Top row (inclusive).
    pub y: u32,
    /// Columns covered.
    pub width: u32,
    /// Rows covered.
    pub height: u32,
}

impl Region {
    /// Create a region from origin and extent.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// `true` when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the rightmost column.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom row.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// `true` when `(x, y)` lies inside the region.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// `true` when `other` lies entirely inside this region.
    pub fn encloses(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x as u64 + other.width as u64 <= self.right() as u64
            && other.y as u64 + other.height as u64 <= self.bottom() as u64
    }

    /// Whether the region may be subdivided.
    ///
    /// Strips one pixel wide or tall never split; this is the recursion's
    /// base case.
    #[inline]
    pub fn can_split(&self) -> bool {
        self.width > 1 && self.height > 1
    }

    /// Child regions in [`Quadrant::ALL`] order.
    ///
    /// The four widths sum to `width` and the four heights to `height` for
    /// any extent; odd remainders land in the right/bottom children.
    pub fn split(&self) -> [Region; 4] {
        debug_assert!(self.can_split(), "region {self} cannot be split");

        let half_w = self.width / 2;
        let half_h = self.height / 2;
        let offset_w = self.width % 2;
        let offset_h = self.height % 2;

        [
            Region::new(self.x, self.y, half_w, half_h),
            Region::new(self.x + half_w, self.y, half_w + offset_w, half_h),
            Region::new(self.x, self.y + half_h, half_w, half_h + offset_h),
            Region::new(
                self.x + half_w,
                self.y + half_h,
                half_w + offset_w,
                half_h + offset_h,
            ),
        ]
    }

    /// Region of a single child.
    pub fn child(&self, quadrant: Quadrant) -> Region {
        self.split()[quadrant.index()]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}
