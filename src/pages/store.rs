//! Page file store
//!
//! Reads the page index and every page up front. Texture, sprite and sound
//! queries are pure functions of the loaded pages.

use super::sound::{parse_sound_directory, SoundInfo};
use super::sprite::{decode_sprite, decode_texture, Bitmap};
use super::{PageDialect, PageLayout};
use crate::cursor::ByteCursor;
use crate::palette::Palette;
use crate::{check_span, ArchiveKind, Result, UnitFailure, UnitRef, WolfError};
use std::fs;
use std::path::Path;

/// Size of the fixed page file header
pub const PAGE_HEADER_SIZE: usize = 6;

/// Fixed page file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    /// Number of pages in the file, including the sound directory
    pub chunks_in_file: u16,
    /// Index of the first sprite page
    pub sprite_start: u16,
    /// Index of the first sound page
    pub sound_start: u16,
}

impl PageHeader {
    fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let mut field = || {
            cursor
                .read_le_u16()
                .map_err(|_| WolfError::HeaderTooShort("page file"))
        };
        Ok(Self {
            chunks_in_file: field()?,
            sprite_start: field()?,
            sound_start: field()?,
        })
    }
}

/// Location of one page in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry {
    /// Absolute file offset; zero means the page is empty
    pub offset: u32,
    /// Page length in bytes
    pub length: u32,
}

impl PageEntry {
    fn is_empty(&self) -> bool {
        self.offset == 0 || self.length == 0
    }
}

/// Loaded page file
#[derive(Debug, Clone)]
pub struct PageStore {
    layout: PageLayout,
    header: PageHeader,
    entries: Vec<PageEntry>,
    pages: Vec<Vec<u8>>,
    sounds: Vec<SoundInfo>,
    failures: Vec<UnitFailure>,
}

impl PageStore {
    /// Open and load a page file
    pub fn open<P: AsRef<Path>>(path: P, layout: PageLayout) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data, layout)
    }

    /// Load a page file held in memory
    ///
    /// A short header or index fails the store; a page whose span lies
    /// outside the file is recorded in [`failures`] and left empty.
    ///
    /// [`failures`]: PageStore::failures
    pub fn from_bytes(data: &[u8], layout: PageLayout) -> Result<Self> {
        let mut cursor = ByteCursor::new(data, "page file");
        let header = PageHeader::parse(&mut cursor)?;
        let entries = read_index(&mut cursor, &header, layout.dialect)?;

        let mut failures = Vec::new();
        let pages = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                if entry.is_empty() {
                    return Vec::new();
                }
                let span = check_span(
                    "page",
                    entry.offset as usize,
                    entry.length as usize,
                    data.len(),
                );
                match span {
                    Ok(range) => data[range].to_vec(),
                    Err(e) => {
                        failures.push(UnitFailure::new(
                            ArchiveKind::Pages,
                            UnitRef::Page(index),
                            &e,
                        ));
                        Vec::new()
                    }
                }
            })
            .collect::<Vec<_>>();

        let sounds = match (header.chunks_in_file as usize).checked_sub(1) {
            Some(directory_page) => parse_sound_directory(
                &pages[directory_page],
                header.sound_start as usize,
                directory_page,
                |page| pages.get(page).map_or(0, Vec::len),
            )?,
            None => Vec::new(),
        };

        log::debug!(
            "VSWAP: {} pages ({} textures, {} sprites), {} sounds, {} failures",
            header.chunks_in_file,
            header.sprite_start,
            header.sound_start.saturating_sub(header.sprite_start),
            sounds.len(),
            failures.len()
        );

        Ok(Self {
            layout,
            header,
            entries,
            pages,
            sounds,
            failures,
        })
    }

    /// Header fields
    pub fn header(&self) -> &PageHeader {
        &self.header
    }

    /// Layout the store was built with
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Index entries, including the synthetic end entry of classic files
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    /// Raw bytes of page `index`; empty for a zero-offset page
    pub fn page(&self, index: usize) -> Option<&[u8]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    /// Number of loaded page slots
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages that could not be read
    pub fn failures(&self) -> &[UnitFailure] {
        &self.failures
    }

    /// Number of texture pages
    pub fn texture_count(&self) -> usize {
        self.header.sprite_start as usize
    }

    /// Number of sprite pages
    pub fn sprite_count(&self) -> usize {
        self.header
            .sound_start
            .saturating_sub(self.header.sprite_start) as usize
    }

    /// Number of sounds in the directory
    pub fn sound_count(&self) -> usize {
        self.sounds.len()
    }

    /// Sound directory
    pub fn sounds(&self) -> &[SoundInfo] {
        &self.sounds
    }

    fn shape_page(
        &self,
        kind: &'static str,
        index: usize,
        first: usize,
        count: usize,
    ) -> Result<&[u8]> {
        if index >= count {
            return Err(WolfError::NoSuchUnit { kind, index });
        }
        match self.page(first + index) {
            Some(page) if !page.is_empty() => Ok(page),
            _ => Err(WolfError::NoSuchUnit { kind, index }),
        }
    }

    /// Texture `index` (relative to the first texture page), row-major
    pub fn texture(&self, index: usize) -> Result<Bitmap> {
        let page = self.shape_page("texture", index, 0, self.texture_count())?;
        decode_texture(page, self.layout.texture_width, self.layout.texture_height)
    }

    /// Texture `index` as packed RGB bytes
    pub fn texture_rgb(&self, index: usize, palette: &Palette) -> Result<Vec<u8>> {
        Ok(self.texture(index)?.to_rgb(palette))
    }

    /// Sprite `index` (relative to the first sprite page)
    ///
    /// Uncovered pixels are [`TRANSPARENT`](crate::TRANSPARENT).
    pub fn sprite(&self, index: usize) -> Result<Bitmap> {
        let first = self.header.sprite_start as usize;
        let page = self.shape_page("sprite", index, first, self.sprite_count())?;
        decode_sprite(page, self.layout.sprite_width, self.layout.sprite_height)
    }

    /// Sprite `index` as packed RGB bytes; transparency is the caller's concern
    pub fn sprite_rgb(&self, index: usize, palette: &Palette) -> Result<Vec<u8>> {
        Ok(self.sprite(index)?.to_rgb(palette))
    }

    /// Samples of sound `index`, reassembled from its pages
    pub fn sound(&self, index: usize) -> Result<Vec<u8>> {
        let info = self
            .sounds
            .get(index)
            .ok_or(WolfError::NoSuchUnit { kind: "sound", index })?;

        let mut samples = Vec::with_capacity(info.length);
        for page in &self.pages[info.start_page..] {
            if samples.len() >= info.length {
                break;
            }
            samples.extend_from_slice(page);
        }
        samples.truncate(info.length);
        Ok(samples)
    }
}

/// Read the offset and length tables and apply the dialect's length rule
fn read_index(
    cursor: &mut ByteCursor<'_>,
    header: &PageHeader,
    dialect: PageDialect,
) -> Result<Vec<PageEntry>> {
    let count = header.chunks_in_file as usize;
    let short = |_| WolfError::HeaderTooShort("page index");

    let offsets = (0..count)
        .map(|_| cursor.read_le_u32().map_err(short))
        .collect::<Result<Vec<_>>>()?;
    let lengths = (0..count)
        .map(|_| cursor.read_le_u16().map_err(short))
        .collect::<Result<Vec<_>>>()?;

    let mut entries: Vec<PageEntry> = offsets
        .iter()
        .zip(&lengths)
        .map(|(&offset, &length)| PageEntry {
            offset,
            length: length as u32,
        })
        .collect();

    match dialect {
        PageDialect::Classic => entries.push(PageEntry {
            offset: 0,
            length: 0,
        }),
        PageDialect::OffsetDelta => {
            for i in 0..entries.len() {
                let offset = entries[i].offset;
                if offset == 0 {
                    continue;
                }
                let next = entries[i + 1..].iter().map(|e| e.offset).find(|&o| o != 0);
                if let Some(next) = next.filter(|&n| n > offset) {
                    entries[i].length = next - offset;
                }
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a page file from page contents; zero-length pages get offset 0
    fn page_file(sprite_start: u16, sound_start: u16, pages: &[&[u8]]) -> Vec<u8> {
        let count = pages.len();
        let mut out = Vec::new();
        out.extend_from_slice(&(count as u16).to_le_bytes());
        out.extend_from_slice(&sprite_start.to_le_bytes());
        out.extend_from_slice(&sound_start.to_le_bytes());

        let mut offset = (PAGE_HEADER_SIZE + count * 6) as u32;
        for page in pages {
            let o = if page.is_empty() { 0 } else { offset };
            out.extend_from_slice(&o.to_le_bytes());
            offset += page.len() as u32;
        }
        for page in pages {
            out.extend_from_slice(&(page.len() as u16).to_le_bytes());
        }
        for page in pages {
            out.extend_from_slice(page);
        }
        out
    }

    #[test]
    fn test_header_and_pages() {
        let file = page_file(1, 2, &[&[1, 2], &[3], &[], &[0, 0, 0, 0]]);
        let store = PageStore::from_bytes(&file, PageLayout::default()).unwrap();
        assert_eq!(store.header().chunks_in_file, 4);
        assert_eq!(store.page(0), Some(&[1u8, 2][..]));
        assert_eq!(store.page(1), Some(&[3u8][..]));
        assert_eq!(store.page(2), Some(&[][..]));
        // synthetic end entry
        assert_eq!(store.page_count(), 5);
        assert_eq!(store.entries()[4], PageEntry { offset: 0, length: 0 });
        assert_eq!(store.texture_count(), 1);
        assert_eq!(store.sprite_count(), 1);
    }

    #[test]
    fn test_offset_delta_lengths() {
        // stored lengths understate the pages; offsets are authoritative
        let mut file = page_file(1, 1, &[&[1, 2, 3], &[4, 5], &[]]);
        let lengths_at = PAGE_HEADER_SIZE + 3 * 4;
        file[lengths_at..lengths_at + 2].copy_from_slice(&1u16.to_le_bytes());
        file[lengths_at + 2..lengths_at + 4].copy_from_slice(&2u16.to_le_bytes());

        let classic = PageStore::from_bytes(&file, PageLayout::default()).unwrap();
        assert_eq!(classic.page(0), Some(&[1u8][..]));
        assert_eq!(classic.layout().dialect, PageDialect::Classic);

        let delta =
            PageStore::from_bytes(&file, PageLayout::with_dialect(PageDialect::OffsetDelta))
                .unwrap();
        assert_eq!(delta.page(0), Some(&[1u8, 2, 3][..]));
        assert_eq!(delta.page(1), Some(&[4u8, 5][..]));
        assert_eq!(delta.page_count(), 3);
        assert_eq!(delta.layout().dialect, PageDialect::OffsetDelta);
    }

    #[test]
    fn test_short_header_fails() {
        assert!(matches!(
            PageStore::from_bytes(&[1, 0, 0], PageLayout::default()),
            Err(WolfError::HeaderTooShort("page file"))
        ));
        assert!(matches!(
            PageStore::from_bytes(&[2, 0, 0, 0, 0, 0, 1, 0], PageLayout::default()),
            Err(WolfError::HeaderTooShort("page index"))
        ));
    }

    #[test]
    fn test_page_outside_file_is_recorded() {
        let mut file = page_file(0, 0, &[&[9, 9], &[]]);
        file[PAGE_HEADER_SIZE..PAGE_HEADER_SIZE + 4].copy_from_slice(&1000u32.to_le_bytes());
        let store = PageStore::from_bytes(&file, PageLayout::default()).unwrap();
        assert_eq!(store.page(0), Some(&[][..]));
        assert_eq!(store.failures().len(), 1);
        assert_eq!(store.failures()[0].unit, UnitRef::Page(0));
    }

    #[test]
    fn test_sound_reassembly() {
        let dir: Vec<u8> = [0u16, 3, 2, 1].iter().flat_map(|w| w.to_le_bytes()).collect();
        let file = page_file(0, 0, &[&[1, 2], &[3], &[4], &dir]);
        let store = PageStore::from_bytes(&file, PageLayout::default()).unwrap();

        assert_eq!(store.sound_count(), 2);
        assert_eq!(store.sounds()[0].length, 3);
        assert_eq!(store.sound(0).unwrap(), vec![1, 2, 3]);
        assert_eq!(store.sound(1).unwrap(), vec![4]);
        assert!(store.sound(2).is_err());
    }

    #[test]
    fn test_empty_shape_page() {
        let file = page_file(2, 2, &[&[], &[0; 4096], &[]]);
        let store = PageStore::from_bytes(&file, PageLayout::default()).unwrap();
        assert!(matches!(
            store.texture(0),
            Err(WolfError::NoSuchUnit { kind: "texture", index: 0 })
        ));
        assert!(store.texture(1).is_ok());
        assert!(store.texture(2).is_err());
        assert!(store.sprite(0).is_err());
    }
}
