//! Page file (`VSWAP`)
//!
//! A flat array of uncompressed pages split into three ranges: wall
//! textures, sprites, and digitized sound, plus a final page holding the
//! sound directory.

mod sound;
mod sprite;
mod store;

pub use sound::{parse_sound_directory, SoundInfo, SOUND_RECORD_SIZE};
pub use sprite::{decode_sprite, decode_texture, Bitmap, POST_SIZE};
pub use store::{PageEntry, PageHeader, PageStore, PAGE_HEADER_SIZE};

/// Default texture and sprite edge length in pixels
pub const DEFAULT_SHAPE_SIZE: usize = 64;

/// How page lengths are recorded in the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageDialect {
    /// Stored 16-bit lengths; the index gains a synthetic empty end entry
    #[default]
    Classic,
    /// Length is the distance to the next page's offset; the stored length
    /// is only used for the final page
    OffsetDelta,
}

/// Shape dimensions and index dialect for a page file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Texture width in pixels
    pub texture_width: usize,
    /// Texture height in pixels
    pub texture_height: usize,
    /// Sprite width in pixels
    pub sprite_width: usize,
    /// Sprite height in pixels
    pub sprite_height: usize,
    /// Page length encoding
    pub dialect: PageDialect,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            texture_width: DEFAULT_SHAPE_SIZE,
            texture_height: DEFAULT_SHAPE_SIZE,
            sprite_width: DEFAULT_SHAPE_SIZE,
            sprite_height: DEFAULT_SHAPE_SIZE,
            dialect: PageDialect::Classic,
        }
    }
}

impl PageLayout {
    /// Default layout with the given dialect
    pub fn with_dialect(dialect: PageDialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }
}
