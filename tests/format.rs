//! Byte layout of `.qtc` streams and decoder behavior on malformed input.

mod common;

use common::*;
use quadcodec::codec::{BitWriter, HEADER_BYTES};
use quadcodec::{
    CodecConfig, CodecError, Compressor, PartitionBuilder, PartitionConfig, PixelGrid, QuadError,
    QuadNode, RasterError, Region, RenderConfig, Rgb, TreeCodec, TruncationPolicy,
};
use test_case::test_case;

/// Assemble a stream by hand.
fn stream(width: i32, height: i32, bits: &[bool], colors: &[u8]) -> Vec<u8> {
    let mut writer = BitWriter::new();
    for &bit in bits {
        writer.push(bit);
    }
    let structure = writer.finish();
    let mut out = Vec::new();
    out.extend_from_slice(&width.to_ne_bytes());
    out.extend_from_slice(&height.to_ne_bytes());
    out.extend_from_slice(&structure.len().to_ne_bytes());
    out.extend_from_slice(&structure);
    out.extend_from_slice(colors);
    out
}

fn codec(policy: TruncationPolicy) -> TreeCodec {
    TreeCodec::new(CodecConfig::default().with_truncation(policy))
}

#[test]
fn single_leaf_layout() {
    let root = QuadNode::leaf(Region::new(0, 0, 5, 3), Rgb::new(10, 20, 30));
    let bytes = TreeCodec::encode(&root, 5, 3).unwrap();
    assert_eq!(bytes, stream(5, 3, &[true], &[10, 20, 30]));
    assert_eq!(bytes.len(), HEADER_BYTES + 1 + 3);
}

#[test]
fn two_tone_scenario() {
    let a = Rgb::new(200, 10, 10);
    let b = Rgb::new(10, 10, 200);
    let grid = two_tone(4, 4, a, b);
    let root = PartitionBuilder::build(&grid, grid.bounds(), 5.0).unwrap();

    let children = root.children().expect("root splits once");
    assert!(children.iter().all(QuadNode::is_leaf));
    assert!(children.iter().all(|c| c.region().width == 2 && c.region().height == 2));
    assert_eq!(leaf_colors(&root), vec![a, b, a, b]);

    let bytes = TreeCodec::encode(&root, 4, 4).unwrap();
    let mut colors = Vec::new();
    for color in [a, b, a, b] {
        colors.extend_from_slice(&color.0);
    }
    assert_eq!(bytes, stream(4, 4, &[false, true, true, true, true], &colors));
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = stream(2, 2, &[true], &[1, 2, 3]);
    bytes.extend_from_slice(&[0xAA; 7]);
    let root = TreeCodec::default().decode(&bytes, 2, 2).unwrap();
    assert!(root.is_leaf());
    assert_eq!(root.color(), Rgb::new(1, 2, 3));
}

#[test]
fn pad_bits_are_not_nodes() {
    // 5 meaningful bits, 3 pad bits; decode must stop after the fifth.
    let colors: Vec<u8> = (0..12).collect();
    let bytes = stream(2, 2, &[false, true, true, true, true], &colors);
    let root = TreeCodec::new(CodecConfig::strict()).decode(&bytes, 2, 2).unwrap();
    assert_eq!(root.pre_order().count(), 5);
    assert_eq!(root.leaves().last().unwrap().color(), Rgb::new(9, 10, 11));
}

#[test_case(&[] ; "empty")]
#[test_case(&[1, 0, 0, 0] ; "width only")]
#[test_case(&[1, 0, 0, 0, 1, 0, 0, 0] ; "no length field")]
fn short_header_is_corrupt(bytes: &[u8]) {
    let err = TreeCodec::default().decode_stream(bytes).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedHeader));
    assert!(err.is_corrupt_stream());
}

#[test_case(0, 4 ; "zero width")]
#[test_case(4, 0 ; "zero height")]
#[test_case(-3, 4 ; "negative width")]
fn non_positive_dimensions_are_corrupt(width: i32, height: i32) {
    let bytes = stream(width, height, &[true], &[0, 0, 0]);
    let err = TreeCodec::default().decode_stream(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::InvalidDimensions { .. }));
}

#[test]
fn structure_length_past_end_is_corrupt() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&4i32.to_ne_bytes());
    bytes.extend_from_slice(&4i32.to_ne_bytes());
    bytes.extend_from_slice(&10usize.to_ne_bytes());
    bytes.extend_from_slice(&[0u8; 3]);
    let err = TreeCodec::default().decode_stream(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CodecError::TruncatedStructure {
            declared: 10,
            available: 3
        }
    ));
}

#[test_case(TruncationPolicy::Permissive ; "permissive")]
#[test_case(TruncationPolicy::Strict ; "strict")]
fn missing_colors_are_corrupt_under_any_policy(policy: TruncationPolicy) {
    let bytes = stream(2, 2, &[false, true, true, true, true], &[0; 9]);
    let err = codec(policy).decode_stream(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedColors { leaf_index: 3 }));
}

#[test]
fn permissive_reads_false_past_structure_end() {
    // Empty structure block: the root reads as internal, and each 1x1 child
    // of the 2x2 image cannot split, so each consumes one color record.
    let colors: Vec<u8> = (0..12).collect();
    let bytes = stream(2, 2, &[], &colors);
    let root = codec(TruncationPolicy::Permissive).decode(&bytes, 2, 2).unwrap();

    assert!(!root.is_leaf());
    assert_eq!(root.leaves().count(), 4);
    assert_eq!(root.leaves().next().unwrap().color(), Rgb::new(0, 1, 2));
}

#[test]
fn permissive_truncation_still_fails_without_colors() {
    let bytes = stream(8, 8, &[], &[]);
    let err = codec(TruncationPolicy::Permissive).decode_stream(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedColors { leaf_index: 0 }));
}

#[test]
fn strict_rejects_exhausted_structure() {
    let colors: Vec<u8> = (0..12).collect();
    let bytes = stream(2, 2, &[], &colors);
    let err = codec(TruncationPolicy::Strict).decode_stream(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::StructureExhausted { node_index: 0 }));
}

#[test]
fn strict_rejects_internal_bit_on_strip() {
    let bytes = stream(1, 4, &[false], &[0, 0, 0]);
    let err = codec(TruncationPolicy::Strict).decode_stream(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::UnsplittableRegion { node_index: 0, .. }));

    let root = codec(TruncationPolicy::Permissive).decode(&bytes, 1, 4).unwrap();
    assert!(root.is_leaf());
}

#[test]
fn decode_takes_geometry_from_dimensions_only() {
    let grid = PixelGrid::from_fn(9, 5, |x, y| Rgb::new((x * 28) as u8, (y * 50) as u8, 0));
    let root = PartitionBuilder::build(&grid, grid.bounds(), 0.0).unwrap();
    let bytes = TreeCodec::encode(&root, 9, 5).unwrap();
    let decoded = TreeCodec::default().decode_stream(&bytes).unwrap();

    assert_eq!((decoded.width, decoded.height), (9, 5));
    assert_equivalent(&decoded.root, &root);
}

#[test]
fn oversized_header_dimensions_fail_without_allocating() {
    let bytes = stream(i32::MAX, i32::MAX, &[true], &[1, 2, 3]);
    let decoded = TreeCodec::default().decode_stream(&bytes).unwrap();
    assert!(decoded.root.is_leaf());

    let err = Compressor::new(PartitionConfig::default())
        .decompress(&bytes, &RenderConfig::default(), &CodecConfig::default())
        .unwrap_err();
    assert!(matches!(err, QuadError::Raster(RasterError::TooLarge { .. })));
}

#[test]
fn encode_rejects_children_off_the_split_grid() {
    // A 1x4 strip cannot split, so no internal node may cover it.
    let strip = Region::new(0, 0, 1, 4);
    let children = [0, 1, 2, 3].map(|y| QuadNode::leaf(Region::new(0, y, 1, 1), Rgb::WHITE));
    let root = QuadNode::internal(strip, Rgb::BLACK, children);
    let err = TreeCodec::encode(&root, 1, 4).unwrap_err();
    assert!(matches!(err, CodecError::UnsplittableNode { node_index: 0, .. }));
    assert!(!err.is_corrupt_stream());
}

#[test]
fn encode_rejects_misplaced_child() {
    let region = Region::new(0, 0, 4, 4);
    let mut quadrants = region.split();
    quadrants.swap(1, 2);
    let children = quadrants.map(|r| QuadNode::leaf(r, Rgb::WHITE));
    let root = QuadNode::internal(region, Rgb::BLACK, children);
    let err = TreeCodec::encode(&root, 4, 4).unwrap_err();
    assert!(matches!(
        err,
        CodecError::RegionMismatch { expected, actual }
            if expected == Region::new(2, 0, 2, 2) && actual == Region::new(0, 2, 2, 2)
    ));
    assert!(!err.is_corrupt_stream());
}
