//! Huffman (bit-tree) expansion used by the graphics archive
//!
//! Every graphics chunk is compressed with a static binary tree shipped in the
//! `VGADICT` file. The dictionary is a flat table of 255 `(left, right)` node
//! pairs; node 254 is the root. Bits are consumed least-significant first.

mod decoder;
mod state;

pub use decoder::BitCursor;
pub use state::{HuffmanNode, NodeTable};

use crate::Result;

/// Size of one serialized node (two little-endian words)
pub const NODE_SIZE: usize = 4;

/// Number of nodes in a complete dictionary
pub const NODE_COUNT: usize = 255;

/// Node link values at or above this refer to another node
pub const NODE_LINK_BASE: u16 = 0x100;

/// Convenience function to expand one buffer with a serialized dictionary
pub fn huffman_expand(data: &[u8], length: usize, dictionary: &[u8]) -> Result<Vec<u8>> {
    NodeTable::from_dictionary(dictionary)?.expand(data, length)
}
