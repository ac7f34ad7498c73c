use tracing::{debug, trace, warn};

use super::bits::BitReader;
use super::header::{ByteCursor, StreamHeader, COLOR_BYTES};
use super::{CodecConfig, CodecError, TruncationPolicy};
use crate::raster::Rgb;
use crate::tree::{QuadNode, Region};

/// Tree reconstructed from a stream, with the dimensions from its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStream {
    /// Image width from the header.
    pub width: u32,
    /// Image height from the header.
    pub height: u32,
    /// Root covering `(0, 0, width, height)`.
    pub root: QuadNode,
}

pub(crate) fn decode_stream(
    bytes: &[u8],
    config: &CodecConfig,
) -> Result<DecodedStream, CodecError> {
    let mut cursor = ByteCursor::new(bytes);
    let header = StreamHeader::read_from(&mut cursor)?;
    let structure = cursor
        .take(header.structure_len)
        .ok_or_else(|| CodecError::TruncatedStructure {
            declared: header.structure_len,
            available: cursor.remaining(),
        })?;

    let mut decoder = Decoder {
        bits: BitReader::new(structure),
        colors: cursor,
        policy: config.truncation,
        leaves: 0,
        exhausted_warned: false,
    };
    let root = decoder.decode_node(Region::new(0, 0, header.width, header.height))?;

    let trailing = decoder.colors.remaining();
    debug!(
        width = header.width,
        height = header.height,
        nodes = decoder.bits.position(),
        leaves = decoder.leaves,
        trailing_bytes = trailing,
        "decoded quadtree"
    );

    Ok(DecodedStream {
        width: header.width,
        height: header.height,
        root,
    })
}

/// Cursor state for one decode pass.
struct Decoder<'a> {
    bits: BitReader<'a>,
    colors: ByteCursor<'a>,
    policy: TruncationPolicy,
    leaves: usize,
    exhausted_warned: bool,
}

impl Decoder<'_> {
    /// Regions are never read from the stream: each child's region comes
    /// from the parent's via [`Region::split`], exactly as in construction.
    fn decode_node(&mut self, region: Region) -> Result<QuadNode, CodecError> {
        let node_index = self.bits.position();
        let is_leaf = match self.bits.read_bit() {
            Some(bit) => bit,
            None => self.past_end(node_index)?,
        };

        if !is_leaf && !region.can_split() {
            match self.policy {
                TruncationPolicy::Strict => {
                    return Err(CodecError::UnsplittableRegion { node_index, region });
                }
                TruncationPolicy::Permissive => {
                    trace!(node_index, region = %region, "internal bit on unsplittable region");
                }
            }
        }

        if is_leaf || !region.can_split() {
            let color = self.read_color()?;
            return Ok(QuadNode::leaf(region, color));
        }

        let [tl, tr, bl, br] = region.split();
        let children = [
            self.decode_node(tl)?,
            self.decode_node(tr)?,
            self.decode_node(bl)?,
            self.decode_node(br)?,
        ];
        Ok(QuadNode::internal(region, Rgb::default(), children))
    }

    /// Structure bit requested past the end of the block.
    fn past_end(&mut self, node_index: usize) -> Result<bool, CodecError> {
        match self.policy {
            TruncationPolicy::Strict => Err(CodecError::StructureExhausted { node_index }),
            TruncationPolicy::Permissive => {
                if !self.exhausted_warned {
                    warn!(
                        node_index,
                        capacity = self.bits.capacity(),
                        "structure bits exhausted; reading false"
                    );
                    self.exhausted_warned = true;
                }
                Ok(false)
            }
        }
    }

    fn read_color(&mut self) -> Result<Rgb, CodecError> {
        let leaf_index = self.leaves;
        let record = self
            .colors
            .take(COLOR_BYTES)
            .ok_or(CodecError::TruncatedColors { leaf_index })?;
        self.leaves += 1;
        Ok(Rgb([record[0], record[1], record[2]]))
    }
}
