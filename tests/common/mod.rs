//! Shared image builders and tree comparisons for integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use quadcodec::{PixelGrid, QuadNode, Region, Rgb};

/// Left half `left`, right half `right`.
pub fn two_tone(width: u32, height: u32, left: Rgb, right: Rgb) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, _| if x < width / 2 { left } else { right })
}

/// Alternating black/white cells of `cell` pixels.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    })
}

/// Smooth diagonal gradient with distinct channel slopes.
pub fn gradient(width: u32, height: u32) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        Rgb::new(
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 127 / (width + height).max(1)) as u8,
        )
    })
}

/// Pre-order list of node regions.
pub fn regions(root: &QuadNode) -> Vec<Region> {
    root.pre_order().map(QuadNode::region).collect()
}

/// Pre-order list of leaf colors.
pub fn leaf_colors(root: &QuadNode) -> Vec<Rgb> {
    root.leaves().map(QuadNode::color).collect()
}

/// Pre-order list of leaf flags.
pub fn shape(root: &QuadNode) -> Vec<bool> {
    root.pre_order().map(QuadNode::is_leaf).collect()
}

/// Trees match in geometry at every node and in color at every leaf.
pub fn assert_equivalent(actual: &QuadNode, expected: &QuadNode) {
    assert_eq!(shape(actual), shape(expected), "tree shapes differ");
    assert_eq!(regions(actual), regions(expected), "node regions differ");
    assert_eq!(leaf_colors(actual), leaf_colors(expected), "leaf colors differ");
}

/// Random grid of 1..=max_side pixels per side.
pub fn arb_grid(max_side: u32) -> impl Strategy<Value = PixelGrid> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(width, height)| {
        let len = (width * height * 3) as usize;
        proptest::collection::vec(any::<u8>(), len).prop_map(move |samples| {
            PixelGrid::from_raw(width, height, samples).expect("length matches dimensions")
        })
    })
}

/// Random grid drawn from a small palette, so uniform blocks actually occur.
pub fn arb_blocky_grid(max_side: u32) -> impl Strategy<Value = PixelGrid> {
    let palette = prop_oneof![
        Just(Rgb::BLACK),
        Just(Rgb::WHITE),
        Just(Rgb::new(200, 30, 30)),
        Just(Rgb::new(30, 200, 90)),
    ];
    (1..=max_side, 1..=max_side).prop_flat_map(move |(width, height)| {
        proptest::collection::vec(palette.clone(), (width * height) as usize).prop_map(
            move |pixels| {
                PixelGrid::from_fn(width, height, |x, y| pixels[(y * width + x) as usize])
            },
        )
    })
}
