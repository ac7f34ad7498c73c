//! Stream header and byte cursor
//!
//! Layout (native byte order):
//!   width: i32 | height: i32 | structure length: usize
//! followed by the structure block and the leaf color records.

use super::CodecError;

/// Bytes used by each dimension field.
pub const DIMENSION_BYTES: usize = std::mem::size_of::<i32>();
/// Bytes used by the structure length field.
pub const LENGTH_BYTES: usize = std::mem::size_of::<usize>();
/// Total header size.
pub const HEADER_BYTES: usize = 2 * DIMENSION_BYTES + LENGTH_BYTES;
/// Bytes per leaf color record.
pub const COLOR_BYTES: usize = 3;

/// Fixed-size prefix of a `.qtc` stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Length of the packed structure block in bytes.
    pub structure_len: usize,
}

impl StreamHeader {
    /// Header for an image; fails when a dimension does not fit in `i32`.
    pub fn new(width: u32, height: u32, structure_len: usize) -> Result<Self, CodecError> {
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(CodecError::DimensionOverflow { width, height });
        }
        Ok(Self {
            width,
            height,
            structure_len,
        })
    }

    /// Append the header bytes to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        // `new` guarantees both dimensions fit
        out.extend_from_slice(&(self.width as i32).to_ne_bytes());
        out.extend_from_slice(&(self.height as i32).to_ne_bytes());
        out.extend_from_slice(&self.structure_len.to_ne_bytes());
    }

    /// Parse the header from the front of `cursor`.
    pub fn read_from(cursor: &mut ByteCursor<'_>) -> Result<Self, CodecError> {
        let width = cursor.read_i32().ok_or(CodecError::TruncatedHeader)?;
        let height = cursor.read_i32().ok_or(CodecError::TruncatedHeader)?;
        let structure_len = cursor.read_usize().ok_or(CodecError::TruncatedHeader)?;
        if width <= 0 || height <= 0 {
            return Err(CodecError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            structure_len,
        })
    }
}

/// Forward-only reader over a byte slice.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Start reading at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Take the next `n` bytes, or `None` (without advancing) if fewer remain.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Some(out)
    }

    /// Read a native-endian `i32`.
    pub fn read_i32(&mut self) -> Option<i32> {
        self.take_array().map(i32::from_ne_bytes)
    }

    /// Read a native-endian `usize`.
    pub fn read_usize(&mut self) -> Option<usize> {
        self.take_array().map(usize::from_ne_bytes)
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}
