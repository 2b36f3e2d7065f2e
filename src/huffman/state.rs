//! Huffman dictionary parsing
//!
//! Turns the raw `VGADICT` bytes into a node table once per store.

use super::{NODE_COUNT, NODE_LINK_BASE, NODE_SIZE};
use crate::cursor::ByteCursor;
use crate::{Result, WolfError};

/// One branch node of the decoding tree
///
/// A link below 0x100 is a leaf carrying that byte; anything else refers to
/// node `link - 0x100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HuffmanNode {
    /// Link followed on a 0 bit
    pub left: u16,
    /// Link followed on a 1 bit
    pub right: u16,
}

impl HuffmanNode {
    /// Link for the given bit
    #[inline]
    pub fn link(&self, bit: bool) -> u16 {
        if bit {
            self.right
        } else {
            self.left
        }
    }
}

/// Decoding tree shared by every chunk of one graphics archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTable {
    nodes: Vec<HuffmanNode>,
}

impl NodeTable {
    /// Build a table from nodes; all [`NODE_COUNT`] nodes up to the root must be present
    pub fn new(nodes: Vec<HuffmanNode>) -> Result<Self> {
        if nodes.len() < NODE_COUNT {
            return Err(WolfError::DictionaryTooShort(nodes.len()));
        }
        Ok(Self { nodes })
    }

    /// Parse a serialized dictionary of little-endian `(left, right)` pairs
    ///
    /// Trailing bytes that do not form a whole node are ignored.
    pub fn from_dictionary(dictionary: &[u8]) -> Result<Self> {
        let count = dictionary.len() / NODE_SIZE;
        let mut cursor = ByteCursor::new(dictionary, "Huffman dictionary");
        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            let left = cursor.read_le_u16()?;
            let right = cursor.read_le_u16()?;
            nodes.push(HuffmanNode { left, right });
        }
        Self::new(nodes)
    }

    /// Number of nodes in the table
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the table has no nodes (never true for a constructed table)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index`, or `NodeOutOfRange`
    #[inline]
    pub fn node(&self, index: usize) -> Result<&HuffmanNode> {
        self.nodes
            .get(index)
            .ok_or(WolfError::NodeOutOfRange(index))
    }

    /// Resolve a link: `Err(byte)` for a leaf, `Ok(node)` for a branch
    #[inline]
    pub(crate) fn follow(link: u16) -> std::result::Result<usize, u8> {
        if link < NODE_LINK_BASE {
            Err(link as u8)
        } else {
            Ok((link - NODE_LINK_BASE) as usize)
        }
    }
}
