//! Chunk directory (`VGAHEAD`) parsing
//!
//! The directory is a packed array of 3-byte little-endian file offsets, one
//! per chunk. `0xFFFFFF` marks a hole. Chunk sizes are implicit: a chunk ends
//! where the next non-hole chunk begins.

use crate::cursor::ByteCursor;
use crate::{Result, CHUNK_HOLE};

/// Width of one directory entry in bytes
pub const DIRECTORY_ENTRY_SIZE: usize = 3;

/// Size of the inflated-length prefix stored before explicit chunks
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Byte range of one chunk inside the data resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Offset of the chunk (its length prefix, if any)
    pub start: usize,
    /// Offset of the next non-hole chunk
    pub end: usize,
}

impl ChunkSpan {
    /// Bytes after the length prefix; zero or negative means no payload
    pub fn payload_len(&self) -> i64 {
        self.end as i64 - self.start as i64 - LENGTH_PREFIX_SIZE as i64
    }
}

/// Parsed chunk directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDirectory {
    offsets: Vec<u32>,
}

impl ChunkDirectory {
    /// Parse a raw directory; trailing bytes short of an entry are ignored
    pub fn parse(head: &[u8]) -> Result<Self> {
        let count = head.len() / DIRECTORY_ENTRY_SIZE;
        let mut cursor = ByteCursor::new(head, "chunk directory");
        let offsets = (0..count)
            .map(|_| cursor.read_le_u24())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { offsets })
    }

    /// Build from already-decoded offsets
    pub fn from_offsets(offsets: Vec<u32>) -> Self {
        Self {
            offsets: offsets.into_iter().map(|o| o & CHUNK_HOLE).collect(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the directory has no entries
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of chunk `index`, or `None` for a hole or missing entry
    pub fn offset(&self, index: usize) -> Option<usize> {
        match self.offsets.get(index) {
            Some(&CHUNK_HOLE) | None => None,
            Some(&offset) => Some(offset as usize),
        }
    }

    /// Span of chunk `index`, skipping holes to find its end
    ///
    /// A chunk with no following entry ends at `data_len`.
    pub fn span(&self, index: usize, data_len: usize) -> Option<ChunkSpan> {
        let start = self.offset(index)?;
        let end = (index + 1..self.offsets.len())
            .find_map(|next| self.offset(next))
            .unwrap_or(data_len);
        Some(ChunkSpan { start, end })
    }
}
