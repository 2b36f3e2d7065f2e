//! Builders for synthetic archives shared by the integration tests

#![allow(dead_code)]

use wolfdata::CHUNK_HOLE;

/// Serialize little-endian words
pub fn words(ws: &[u16]) -> Vec<u8> {
    ws.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Dictionary of a complete depth-8 tree: every byte costs exactly 8 bits
///
/// Internal nodes are laid out as a heap (heap slot `h` is node `254 - h`),
/// so the root lands on node 254 and heap slots 255..511 are the leaves.
pub fn identity_dictionary() -> Vec<u8> {
    let link = |child: usize| -> u16 {
        if child >= 255 {
            (child - 255) as u16
        } else {
            0x100 + (254 - child) as u16
        }
    };
    let mut nodes = vec![(0u16, 0u16); 255];
    for h in 0..255 {
        nodes[254 - h] = (link(2 * h + 1), link(2 * h + 2));
    }
    nodes
        .iter()
        .flat_map(|&(l, r)| [l.to_le_bytes(), r.to_le_bytes()].concat())
        .collect()
}

/// Encode bytes against [`identity_dictionary`], bits packed LSB first
pub fn huffman_encode(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &byte in data {
        let mut path = Vec::with_capacity(8);
        let mut slot = byte as usize + 255;
        while slot > 0 {
            path.push(slot % 2 == 0);
            slot = (slot - 1) / 2;
        }
        bits.extend(path.into_iter().rev());
    }

    let mut out = vec![0u8; bits.len().div_ceil(8)];
    for (i, bit) in bits.into_iter().enumerate() {
        if bit {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    out
}

/// Graphics data file plus its directory
#[derive(Default)]
pub struct GraphicsBuilder {
    pub head: Vec<u32>,
    pub data: Vec<u8>,
}

impl GraphicsBuilder {
    /// Append a chunk carrying a 4-byte length prefix
    pub fn explicit(&mut self, payload: &[u8]) -> &mut Self {
        self.head.push(self.data.len() as u32);
        self.data.extend_from_slice(&(payload.len() as i32).to_le_bytes());
        self.data.extend_from_slice(&huffman_encode(payload));
        self
    }

    /// Append a chunk whose length is implied by its category
    pub fn implicit(&mut self, payload: &[u8]) -> &mut Self {
        self.head.push(self.data.len() as u32);
        self.data.extend_from_slice(&huffman_encode(payload));
        self
    }

    /// Append a hole
    pub fn hole(&mut self) -> &mut Self {
        self.head.push(CHUNK_HOLE);
        self
    }

    /// Directory bytes, closed with an end-of-data entry
    pub fn head_bytes(&self) -> Vec<u8> {
        self.head
            .iter()
            .chain(std::iter::once(&(self.data.len() as u32)))
            .flat_map(|o| o.to_le_bytes()[..3].to_vec())
            .collect()
    }
}

/// Page file from page contents; empty pages get offset 0
pub fn page_file(sprite_start: u16, sound_start: u16, pages: &[Vec<u8>]) -> Vec<u8> {
    let count = pages.len();
    let mut out = words(&[count as u16, sprite_start, sound_start]);
    let mut offset = 6 + count * 6;
    for page in pages {
        let o = if page.is_empty() { 0 } else { offset as u32 };
        out.extend_from_slice(&o.to_le_bytes());
        offset += page.len();
    }
    for page in pages {
        out.extend_from_slice(&(page.len() as u16).to_le_bytes());
    }
    for page in pages {
        out.extend_from_slice(page);
    }
    out
}

/// Compressed plane holding `value` in every cell: literal Carmack words
/// wrapping an RLEW run
pub fn plane_bytes(tag: u16, cells: usize, value: u16) -> Vec<u8> {
    let rlew = words(&[(cells * 2) as u16, tag, cells as u16, value]);
    let mut out = (rlew.len() as u16).to_le_bytes().to_vec();
    out.extend_from_slice(&rlew);
    out
}

/// 38-byte map header
pub fn map_header(
    offsets: [i32; 3],
    lengths: [u16; 3],
    width: u16,
    height: u16,
    name: &str,
) -> Vec<u8> {
    let mut out = Vec::new();
    for o in offsets {
        out.extend_from_slice(&o.to_le_bytes());
    }
    out.extend_from_slice(&words(&lengths));
    out.extend_from_slice(&words(&[width, height]));
    let mut raw = [0u8; 16];
    raw[..name.len()].copy_from_slice(name.as_bytes());
    out.extend_from_slice(&raw);
    out
}

/// Map head: tag followed by header offsets
pub fn map_head(tag: u16, offsets: &[i32]) -> Vec<u8> {
    let mut out = tag.to_le_bytes().to_vec();
    for o in offsets {
        out.extend_from_slice(&o.to_le_bytes());
    }
    out
}
