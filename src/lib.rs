//! wolfdata - reader for Wolfenstein 3D era resource archives
//!
//! This crate decodes the three archive families shipped with Wolfenstein 3D
//! and Spear of Destiny, together with the three compression schemes they use:
//!
//! - **Graphics** (`VGAHEAD` / `VGADICT` / `VGAGRAPH`): a sparse chunk directory
//!   of Huffman-compressed pictures, fonts, tiles, palettes and text screens
//! - **Pages** (`VSWAP`): uncompressed wall textures, compiled sprites and
//!   digitized sounds chained over several pages
//! - **Maps** (`MAPHEAD` / `GAMEMAPS`): three planes of 16-bit tile codes per
//!   map, compressed with Carmack and then RLEW
//!
//! Every store decodes its archive once at construction and answers queries
//! from immutable buffers afterwards. A unit that fails to decode is logged
//! through the [`log`] facade and recorded as a [`UnitFailure`] without
//! aborting its siblings.
//!
//! # Example
//!
//! ```no_run
//! use wolfdata::{Edition, GameFiles, PageLayout};
//!
//! let files = GameFiles::new("/games/wolf3d", Edition::Registered);
//! let maps = files.open_maps()?;
//! for (index, map) in maps.maps() {
//!     println!("{index}: {} ({}x{})", map.name(), map.width(), map.height());
//! }
//!
//! let pages = files.open_pages(PageLayout::default())?;
//! let wall = pages.texture(0)?;
//! assert_eq!(wall.pixels.len(), 64 * 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Decoders
//!
//! ```
//! use wolfdata::rlew_expand;
//!
//! let data = [0x11, 0x11, 0xCD, 0xAB, 0x03, 0x00, 0x22, 0x22];
//! let out = rlew_expand(0xABCD, 6, &data)?;
//! assert_eq!(out, [0x11, 0x11, 0x22, 0x22, 0x22, 0x22]);
//! # Ok::<(), wolfdata::WolfError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod carmack;
pub mod common;
pub mod error;
pub mod files;
pub mod graphics;
pub mod huffman;
pub mod maps;
pub mod pages;
pub mod palette;
pub mod rlew;

mod cursor;

// Re-export commonly used types
pub use common::{
    ArchiveKind, Edition, Result, UnitFailure, UnitRef, WolfError, CHUNK_HOLE, PALETTE_SIZE,
    PLANE_COUNT, ROOT_NODE, TRANSPARENT,
};
pub use files::GameFiles;
pub use graphics::{ChunkCategory, Font, GraphicsLayout, GraphicsStore, Picture, PictureSize};
pub use huffman::{huffman_expand, NodeTable};
pub use maps::{Map, MapStore, Plane};
pub use pages::{Bitmap, PageDialect, PageLayout, PageStore, SoundInfo};
pub use palette::{Palette, Rgb};

pub(crate) use common::check_span;

// Convenience functions

/// Expand a Carmack-compressed buffer
///
/// # Arguments
/// * `data` - Compressed bytes, starting with the expanded length word
///
/// # Returns
/// The expanded bytes
pub fn carmack_expand(data: &[u8]) -> Result<Vec<u8>> {
    carmack::carmack_expand(data)
}

/// Expand an RLEW stream
///
/// # Arguments
/// * `tag` - Word marking a run
/// * `length` - Exact output length in bytes
/// * `data` - Compressed words
///
/// # Returns
/// Exactly `length` bytes
pub fn rlew_expand(tag: u16, length: usize, data: &[u8]) -> Result<Vec<u8>> {
    rlew::rlew_expand(tag, length, data)
}
