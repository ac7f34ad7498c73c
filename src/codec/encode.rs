use tracing::debug;

use super::bits::BitWriter;
use super::header::{StreamHeader, COLOR_BYTES, HEADER_BYTES};
use super::CodecError;
use crate::tree::{QuadNode, Region};

/// Serialize `root` as header, structure block, then leaf colors.
pub(crate) fn encode_tree(
    root: &QuadNode,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, CodecError> {
    let expected = Region::new(0, 0, width, height);
    if root.region() != expected {
        return Err(CodecError::RegionMismatch {
            expected,
            actual: root.region(),
        });
    }

    let mut bits = BitWriter::new();
    let mut colors = Vec::new();
    write_node(root, &mut bits, &mut colors)?;

    let node_count = bits.len();
    let leaf_count = colors.len() / COLOR_BYTES;
    let structure = bits.finish();
    let header = StreamHeader::new(width, height, structure.len())?;

    let mut out = Vec::with_capacity(HEADER_BYTES + structure.len() + colors.len());
    header.write_to(&mut out);
    out.extend_from_slice(&structure);
    out.extend_from_slice(&colors);

    debug!(
        width,
        height,
        nodes = node_count,
        leaves = leaf_count,
        structure_bytes = structure.len(),
        total_bytes = out.len(),
        "encoded quadtree"
    );
    Ok(out)
}

/// Pre-order: own bit first (true = leaf), then children for internal nodes.
///
/// Internal nodes must sit on the split grid, since decode rebuilds geometry
/// from `Region::split` alone.
fn write_node(
    node: &QuadNode,
    bits: &mut BitWriter,
    colors: &mut Vec<u8>,
) -> Result<(), CodecError> {
    let Some(children) = node.children() else {
        bits.push(true);
        colors.extend_from_slice(&node.color().channels());
        return Ok(());
    };

    let region = node.region();
    if !region.can_split() {
        return Err(CodecError::UnsplittableNode {
            node_index: bits.len(),
            region,
        });
    }
    for (child, expected) in children.iter().zip(region.split()) {
        if child.region() != expected {
            return Err(CodecError::RegionMismatch {
                expected,
                actual: child.region(),
            });
        }
    }

    bits.push(false);
    for child in children.iter() {
        write_node(child, bits, colors)?;
    }
    Ok(())
}
