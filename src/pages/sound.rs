//! Digitized sound directory
//!
//! The last page of the page file lists the sounds as pairs of 16-bit words:
//! the first page of each sound (relative to the first sound page) and the
//! low 16 bits of its length. Sounds span whole pages, so the real byte
//! length is the sum of the page sizes up to the next sound's first page.

use crate::cursor::ByteCursor;
use crate::Result;

/// Size of one directory record
pub const SOUND_RECORD_SIZE: usize = 4;

/// Location and length of one digitized sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundInfo {
    /// Absolute index of the first page
    pub start_page: usize,
    /// Absolute index one past the last page
    pub end_page: usize,
    /// Sum of the sizes of pages `start_page..end_page`
    pub length: usize,
    /// Length word as recorded in the directory (low 16 bits only)
    pub recorded_length: u16,
}

/// Parse the sound directory stored in page `directory_page`
///
/// `page_len` yields the stored size of a page. Records whose first page
/// falls at or beyond the directory page end the scan.
pub fn parse_sound_directory<F>(
    directory: &[u8],
    sound_start: usize,
    directory_page: usize,
    page_len: F,
) -> Result<Vec<SoundInfo>>
where
    F: Fn(usize) -> usize,
{
    let count = directory.len() / SOUND_RECORD_SIZE;
    let mut cursor = ByteCursor::new(directory, "sound directory");
    let records = (0..count)
        .map(|_| -> Result<(u16, u16)> {
            Ok((cursor.read_le_u16()?, cursor.read_le_u16()?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut sounds = Vec::with_capacity(count);
    for (i, &(start, recorded_length)) in records.iter().enumerate() {
        let start_page = sound_start + start as usize;
        if start_page >= directory_page {
            log::debug!(
                "VSWAP: sound directory ends at record {i} of {count} (page {start_page})"
            );
            break;
        }

        let end_page = match records.get(i + 1) {
            Some(&(next, _)) if next != 0 && sound_start + (next as usize) < directory_page => {
                sound_start + next as usize
            }
            _ => directory_page,
        };

        let length = (start_page..end_page.max(start_page)).map(&page_len).sum();
        sounds.push(SoundInfo {
            start_page,
            end_page,
            length,
            recorded_length,
        });
    }

    Ok(sounds)
}
