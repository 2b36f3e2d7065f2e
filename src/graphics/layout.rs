//! Per-edition chunk layout of the graphics archive
//!
//! The graphics archive carries no table of contents describing what each
//! chunk holds; the engine compiles the category boundaries in. These records
//! reproduce them for each edition.

use crate::Edition;

/// Category of a graphics chunk, derived from its index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkCategory {
    /// Picture dimension table
    PictureTable,
    /// Proportional font
    Font,
    /// Masked font
    MaskedFont,
    /// Unmasked picture
    Picture,
    /// Masked picture
    MaskedPicture,
    /// Sprite
    Sprite,
    /// 8×8 tiles, all in one chunk
    Tile8,
    /// Masked 8×8 tiles, all in one chunk
    Tile8Masked,
    /// 16×16 tile
    Tile16,
    /// Masked 16×16 tile
    Tile16Masked,
    /// 32×32 tile
    Tile32,
    /// Masked 32×32 tile
    Tile32Masked,
    /// Anything else: text screens, palettes, demos, end art
    Extern,
}

/// Chunk category boundaries and tile block sizes for one edition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsLayout {
    /// Bytes in one unmasked 8×8 tile
    pub block: usize,
    /// Bytes in one masked 8×8 tile
    pub mask_block: usize,

    /// Chunks in the archive
    pub num_chunks: usize,
    /// Number of 8×8 tiles in the tile8 chunk
    pub num_tile8: usize,
    /// Number of masked 8×8 tiles in the tile8m chunk
    pub num_tile8m: usize,

    /// Chunk holding the picture dimension table
    pub struct_pic: usize,
    /// First font chunk
    pub start_font: usize,
    /// First masked font chunk
    pub start_fontm: usize,
    /// First picture chunk
    pub start_pics: usize,
    /// First masked picture chunk
    pub start_picm: usize,
    /// First sprite chunk
    pub start_sprites: usize,
    /// The tile8 chunk
    pub start_tile8: usize,
    /// The tile8m chunk
    pub start_tile8m: usize,
    /// First tile16 chunk
    pub start_tile16: usize,
    /// First tile16m chunk
    pub start_tile16m: usize,
    /// First tile32 chunk
    pub start_tile32: usize,
    /// First tile32m chunk
    pub start_tile32m: usize,
    /// First extern chunk
    pub start_externs: usize,
}

impl GraphicsLayout {
    /// Layout compiled into the given edition
    pub const fn for_edition(edition: Edition) -> Self {
        match edition {
            Edition::Shareware => Self {
                block: 64,
                mask_block: 128,
                num_chunks: 556,
                num_tile8: 72,
                num_tile8m: 0,
                struct_pic: 0,
                start_font: 1,
                start_fontm: 3,
                start_pics: 3,
                start_picm: 139,
                start_sprites: 139,
                start_tile8: 139,
                start_tile8m: 140,
                start_tile16: 140,
                start_tile16m: 284,
                start_tile32: 554,
                start_tile32m: 554,
                start_externs: 554,
            },
            Edition::Registered => Self {
                block: 64,
                mask_block: 128,
                num_chunks: 149,
                num_tile8: 72,
                num_tile8m: 0,
                struct_pic: 0,
                start_font: 1,
                start_fontm: 3,
                start_pics: 3,
                start_picm: 135,
                start_sprites: 135,
                start_tile8: 135,
                start_tile8m: 136,
                start_tile16: 136,
                start_tile16m: 136,
                start_tile32: 136,
                start_tile32m: 136,
                start_externs: 136,
            },
            Edition::SpearOfDestiny => Self {
                block: 64,
                mask_block: 128,
                num_chunks: 169,
                num_tile8: 72,
                num_tile8m: 0,
                struct_pic: 0,
                start_font: 1,
                start_fontm: 3,
                start_pics: 3,
                start_picm: 150,
                start_sprites: 150,
                start_tile8: 150,
                start_tile8m: 151,
                start_tile16: 151,
                start_tile16m: 151,
                start_tile32: 151,
                start_tile32m: 151,
                start_externs: 151,
            },
        }
    }

    /// Number of unmasked pictures
    pub fn num_pics(&self) -> usize {
        self.start_picm - self.start_pics
    }

    /// Category of chunk `index`
    pub fn category(&self, index: usize) -> ChunkCategory {
        match index {
            i if i == self.struct_pic => ChunkCategory::PictureTable,
            i if i < self.start_font => ChunkCategory::Extern,
            i if i < self.start_fontm => ChunkCategory::Font,
            i if i < self.start_pics => ChunkCategory::MaskedFont,
            i if i < self.start_picm => ChunkCategory::Picture,
            i if i < self.start_sprites => ChunkCategory::MaskedPicture,
            i if i < self.start_tile8 => ChunkCategory::Sprite,
            i if i < self.start_tile8m => ChunkCategory::Tile8,
            i if i < self.start_tile16 => ChunkCategory::Tile8Masked,
            i if i < self.start_tile16m => ChunkCategory::Tile16,
            i if i < self.start_tile32 => ChunkCategory::Tile16Masked,
            i if i < self.start_tile32m => ChunkCategory::Tile32,
            i if i < self.start_externs => ChunkCategory::Tile32Masked,
            _ => ChunkCategory::Extern,
        }
    }

    /// Inflated size of tile chunks, which carry no length prefix
    ///
    /// Returns `None` for chunks that store their length explicitly.
    pub fn implicit_length(&self, index: usize) -> Option<usize> {
        let length = match self.category(index) {
            ChunkCategory::Tile8 => self.block * self.num_tile8,
            ChunkCategory::Tile8Masked => self.mask_block * self.num_tile8m,
            ChunkCategory::Tile16 => self.block * 4,
            ChunkCategory::Tile16Masked => self.mask_block * 4,
            ChunkCategory::Tile32 => self.block * 16,
            ChunkCategory::Tile32Masked => self.mask_block * 16,
            _ => return None,
        };
        Some(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_categories() {
        let layout = GraphicsLayout::for_edition(Edition::Registered);
        assert_eq!(layout.category(0), ChunkCategory::PictureTable);
        assert_eq!(layout.category(1), ChunkCategory::Font);
        assert_eq!(layout.category(3), ChunkCategory::Picture);
        assert_eq!(layout.category(134), ChunkCategory::Picture);
        assert_eq!(layout.category(135), ChunkCategory::Tile8);
        assert_eq!(layout.category(136), ChunkCategory::Extern);
        assert_eq!(layout.num_pics(), 132);
    }

    #[test]
    fn test_implicit_lengths() {
        let wl6 = GraphicsLayout::for_edition(Edition::Registered);
        assert_eq!(wl6.implicit_length(135), Some(64 * 72));
        assert_eq!(wl6.implicit_length(3), None);
        assert_eq!(wl6.implicit_length(136), None);

        let wl1 = GraphicsLayout::for_edition(Edition::Shareware);
        assert_eq!(wl1.implicit_length(139), Some(64 * 72));
        assert_eq!(wl1.implicit_length(140), Some(64 * 4));
        assert_eq!(wl1.implicit_length(283), Some(64 * 4));
        assert_eq!(wl1.implicit_length(284), Some(128 * 4));
        assert_eq!(wl1.implicit_length(553), Some(128 * 4));
        assert_eq!(wl1.implicit_length(554), None);
    }

    #[test]
    fn test_pictures_per_edition() {
        assert_eq!(GraphicsLayout::for_edition(Edition::Shareware).num_pics(), 136);
        assert_eq!(GraphicsLayout::for_edition(Edition::SpearOfDestiny).num_pics(), 147);
    }
}
