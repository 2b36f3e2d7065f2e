//! Bit reading and tree traversal
//!
//! Implements the expansion loop: walk from the root one bit at a time and
//! emit a byte whenever a leaf link is reached.

use super::state::NodeTable;
use crate::{Result, WolfError, ROOT_NODE};

/// Bit position inside a compressed buffer
///
/// Owned by a single expansion call. Bits are taken from bit 0 upward within
/// each byte.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    data: &'a [u8],
    pos: usize,
    mask: u8,
}

impl<'a> BitCursor<'a> {
    /// Start reading at the first bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            mask: 0x01,
        }
    }

    /// Next bit, or `None` once the input is exhausted
    #[inline]
    pub fn next_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.pos)?;
        let bit = byte & self.mask != 0;
        if self.mask == 0x80 {
            self.mask = 0x01;
            self.pos += 1;
        } else {
            self.mask <<= 1;
        }
        Some(bit)
    }

    /// Whole bytes consumed so far
    pub fn bytes_consumed(&self) -> usize {
        self.pos
    }
}

impl NodeTable {
    /// Expand `data` into `out`, returning the number of bytes emitted
    ///
    /// Stops when `out` is full or the input runs out, whichever comes first.
    /// Running out early is not an error; the rest of `out` is untouched.
    pub fn expand_into(&self, data: &[u8], out: &mut [u8]) -> Result<usize> {
        let mut bits = BitCursor::new(data);
        let mut written = 0;
        let mut node = ROOT_NODE;
        let mut depth = 0usize;

        while written < out.len() {
            let Some(bit) = bits.next_bit() else {
                break;
            };

            let link = self.node(node)?.link(bit);
            match NodeTable::follow(link) {
                Err(byte) => {
                    out[written] = byte;
                    written += 1;
                    node = ROOT_NODE;
                    depth = 0;
                }
                Ok(next) => {
                    // A path from the root visits each node at most once.
                    depth += 1;
                    if depth > self.len() {
                        return Err(WolfError::CyclicTree(next));
                    }
                    node = next;
                }
            }
        }

        log::trace!(
            "huffman: {} of {} bytes from {} input bytes",
            written,
            out.len(),
            bits.bytes_consumed()
        );
        Ok(written)
    }

    /// Expand `data` into a new buffer of exactly `length` bytes
    ///
    /// Bytes not produced before the input ran out are left as zero.
    pub fn expand(&self, data: &[u8], length: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; length];
        self.expand_into(data, &mut out)?;
        Ok(out)
    }
}
