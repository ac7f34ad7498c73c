//! Structure-bit packing
//!
//! One bit per tree node, packed least-significant-bit first into bytes.
//! The final partial byte is zero-padded in its unused high bits.

use bitvec::prelude::*;

/// Accumulates structure bits in pre-order.
#[derive(Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Lsb0>,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Bits written so far.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bytes the packed block will occupy.
    pub fn byte_len(&self) -> usize {
        (self.bits.len() + 7) / 8
    }

    /// Flush into packed bytes, zeroing pad bits of the last byte.
    pub fn finish(self) -> Vec<u8> {
        let len = self.bits.len();
        let mut bytes = self.bits.into_vec();
        bytes.truncate((len + 7) / 8);
        let tail = len % 8;
        if tail != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= (1u8 << tail) - 1;
            }
        }
        bytes
    }
}

/// Reads structure bits back with an explicit cursor.
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Lsb0>,
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Read bits from a packed block.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bits: bytes.view_bits::<Lsb0>(),
            cursor: 0,
        }
    }

    /// Consume the next bit, or `None` once the block (including pad bits)
    /// is exhausted. The cursor advances either way, so
    /// [`position`](Self::position) counts every request.
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.cursor).map(|bit| *bit);
        self.cursor += 1;
        bit
    }

    /// Bits requested so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Total bits in the block, pad bits included.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// `true` once the cursor has moved past the block.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.bits.len()
    }
}
