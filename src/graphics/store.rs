//! Graphics archive store
//!
//! Decodes every chunk of a `VGAHEAD`/`VGADICT`/`VGAGRAPH` triple at
//! construction and serves immutable views afterwards.

use super::directory::{ChunkDirectory, ChunkSpan, LENGTH_PREFIX_SIZE};
use super::font::Font;
use super::layout::GraphicsLayout;
use super::picture::{Picture, PictureSize};
use crate::cursor::ByteCursor;
use crate::huffman::NodeTable;
use crate::palette::Palette;
use crate::{check_span, ArchiveKind, Result, UnitFailure, UnitRef, WolfError};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Text screen width in characters
pub const TEXT_COLUMNS: usize = 80;

/// Text screen height in rows
pub const TEXT_ROWS: usize = 25;

/// Bytes preceding the first character cell of a text screen chunk
pub const TEXT_HEADER_SIZE: usize = 7;

/// Decoded graphics archive
#[derive(Debug, Clone)]
pub struct GraphicsStore {
    layout: GraphicsLayout,
    chunks: BTreeMap<usize, Vec<u8>>,
    pictures: Vec<PictureSize>,
    failures: Vec<UnitFailure>,
}

impl GraphicsStore {
    /// Open the three graphics files and decode them
    pub fn open<P: AsRef<Path>>(
        head: P,
        dictionary: P,
        data: P,
        layout: GraphicsLayout,
    ) -> Result<Self> {
        let head = fs::read(head)?;
        let dictionary = fs::read(dictionary)?;
        let data = fs::read(data)?;
        Self::from_bytes(&head, &dictionary, &data, layout)
    }

    /// Decode an archive already held in memory
    ///
    /// A malformed directory or dictionary fails the whole store; a chunk
    /// that fails to decode is logged, recorded in [`failures`] and omitted.
    ///
    /// A chunk whose stored length exceeds eight bytes per compressed byte
    /// is such a failure, even where a truncated stream would otherwise be
    /// zero filled: no tree can emit more than one byte per bit.
    ///
    /// [`failures`]: GraphicsStore::failures
    pub fn from_bytes(
        head: &[u8],
        dictionary: &[u8],
        data: &[u8],
        layout: GraphicsLayout,
    ) -> Result<Self> {
        let directory = ChunkDirectory::parse(head)?;
        let table = NodeTable::from_dictionary(dictionary)?;

        let mut chunks = BTreeMap::new();
        let mut failures = Vec::new();
        let count = layout.num_chunks.min(directory.len());

        for index in 0..count {
            let Some(span) = directory.span(index, data.len()) else {
                continue;
            };
            match decode_chunk(&layout, &table, data, index, span) {
                Ok(Some(bytes)) => {
                    chunks.insert(index, bytes);
                }
                Ok(None) => log::trace!("VGAGRAPH: chunk {index} has no payload"),
                Err(e) => failures.push(UnitFailure::new(
                    ArchiveKind::Graphics,
                    UnitRef::Chunk(index),
                    &e,
                )),
            }
        }

        let pictures = match chunks.remove(&layout.struct_pic) {
            Some(table) => PictureSize::parse_table(&table)?,
            None => {
                log::warn!(
                    "VGAGRAPH: picture table chunk {} missing, pictures unavailable",
                    layout.struct_pic
                );
                Vec::new()
            }
        };

        log::debug!(
            "VGAGRAPH: decoded {} of {} chunks, {} pictures, {} failures",
            chunks.len(),
            count,
            pictures.len(),
            failures.len()
        );

        Ok(Self {
            layout,
            chunks,
            pictures,
            failures,
        })
    }

    /// Layout the store was built with
    pub fn layout(&self) -> &GraphicsLayout {
        &self.layout
    }

    /// Decoded bytes of chunk `index`, or `None` for a hole
    pub fn chunk(&self, index: usize) -> Option<&[u8]> {
        self.chunks.get(&index).map(Vec::as_slice)
    }

    /// Number of chunks holding data
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Indices of chunks holding data, ascending
    pub fn chunk_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks.keys().copied()
    }

    /// Chunks that failed to decode
    pub fn failures(&self) -> &[UnitFailure] {
        &self.failures
    }

    fn require(&self, kind: &'static str, index: usize) -> Result<&[u8]> {
        self.chunk(index)
            .ok_or(WolfError::NoSuchUnit { kind, index })
    }

    /// Number of entries in the picture table
    pub fn picture_count(&self) -> usize {
        self.pictures.len()
    }

    /// Dimensions of picture `index` (relative to the first picture chunk)
    pub fn picture_size(&self, index: usize) -> Option<PictureSize> {
        self.pictures.get(index).copied()
    }

    /// Picture `index` as palette indices
    pub fn picture(&self, index: usize) -> Result<Picture> {
        let size = self.picture_size(index).ok_or(WolfError::NoSuchUnit {
            kind: "picture",
            index,
        })?;
        let data = self.require("picture", self.layout.start_pics + index)?;
        Picture::deinterleave(data, size)
    }

    /// Picture `index` as packed RGB bytes
    pub fn picture_rgb(&self, index: usize, palette: &Palette) -> Result<Vec<u8>> {
        Ok(self.picture(index)?.to_rgb(palette))
    }

    /// Font in chunk `index`
    pub fn font(&self, index: usize) -> Result<Font<'_>> {
        Font::parse(self.require("font", index)?)
    }

    /// Palette stored as raw 6-bit triples in chunk `index`
    pub fn palette(&self, index: usize) -> Result<Palette> {
        Palette::from_vga_bytes(self.require("palette", index)?)
    }

    /// Text-mode screen in chunk `index`: 25 lines of 80 characters
    ///
    /// Attribute bytes are skipped. Each line ends with a newline.
    pub fn text_screen(&self, index: usize) -> Result<String> {
        let data = self.require("text screen", index)?;
        let cells = TEXT_COLUMNS * TEXT_ROWS * 2;
        let range = check_span("text screen", TEXT_HEADER_SIZE, cells, data.len())?;

        let mut text = String::with_capacity((TEXT_COLUMNS + 1) * TEXT_ROWS);
        for row in data[range].chunks_exact(TEXT_COLUMNS * 2) {
            text.extend(row.iter().step_by(2).map(|&b| b as char));
            text.push('\n');
        }
        Ok(text)
    }
}

/// Decode one chunk; `Ok(None)` means it has no payload
fn decode_chunk(
    layout: &GraphicsLayout,
    table: &NodeTable,
    data: &[u8],
    index: usize,
    span: ChunkSpan,
) -> Result<Option<Vec<u8>>> {
    if span.payload_len() <= 0 {
        return Ok(None);
    }
    check_span("chunk", span.start, span.end - span.start, data.len())?;

    let (inflated, body) = match layout.implicit_length(index) {
        Some(length) => (length, span.start),
        None => {
            let stored = ByteCursor::at(data, span.start, "chunk length")?.read_le_i32()?;
            if stored <= 0 {
                return Ok(None);
            }
            (stored as usize, span.start + LENGTH_PREFIX_SIZE)
        }
    };

    let compressed = &data[body..span.end];
    // every leaf sits at least one bit below the root
    let reachable = compressed.len().saturating_mul(8);
    if inflated > reachable {
        return Err(WolfError::InvalidData(format!(
            "chunk claims {inflated} bytes from {} compressed bytes",
            compressed.len()
        )));
    }
    log::trace!(
        "VGAGRAPH: chunk {index}: {} -> {inflated} bytes",
        compressed.len()
    );
    table.expand(compressed, inflated).map(Some)
}
