//! Graphics archive (`VGAHEAD` / `VGADICT` / `VGAGRAPH`)
//!
//! A sparse directory of Huffman-compressed chunks holding fonts, pictures,
//! tiles, palettes and text screens.

mod directory;
mod font;
mod layout;
mod picture;
mod store;

pub use directory::{ChunkDirectory, ChunkSpan, DIRECTORY_ENTRY_SIZE, LENGTH_PREFIX_SIZE};
pub use font::{Font, Glyph, GlyphStrip, FONT_GLYPHS, FONT_HEADER_SIZE, GLYPH_SET};
pub use layout::{ChunkCategory, GraphicsLayout};
pub use picture::{Picture, PictureSize};
pub use store::{GraphicsStore, TEXT_COLUMNS, TEXT_HEADER_SIZE, TEXT_ROWS};
