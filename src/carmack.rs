//! Carmack expansion used by the level archive
//!
//! A word-granular LZ scheme. The stream starts with the expanded length in
//! bytes, followed by two-byte tokens:
//!
//! - `[count, 0xA7] dist` copies `count` words from `dist` words behind the
//!   output cursor (near pointer)
//! - `[count, 0xA8] offset:u16` copies `count` words from word `offset` of the
//!   output (far pointer)
//! - `[0, 0xA7|0xA8] low` is the literal word `[low, tag]`
//! - anything else is a literal word
//!
//! Copies may overlap their own output and are resolved byte by byte.

use crate::cursor::ByteCursor;
use crate::{Result, WolfError};

/// High byte of a near-pointer token
pub const NEAR_TAG: u8 = 0xA7;

/// High byte of a far-pointer token
pub const FAR_TAG: u8 = 0xA8;

/// Expand a Carmack-compressed buffer
///
/// The output length is taken from the first word of `data`. Input that ends
/// before the output is full is an error.
pub fn carmack_expand(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = ByteCursor::new(data, "Carmack stream");
    let length = input.read_le_u16().map_err(|_| WolfError::UnexpectedEof)? as usize;
    let mut out = CarmackOutput::new(length);

    while !out.is_full() {
        let mut next = || input.read_u8().map_err(|_| WolfError::UnexpectedEof);
        let count = next()?;
        let tag = next()?;

        match tag {
            NEAR_TAG | FAR_TAG if count == 0 => {
                let low = next()?;
                out.push_word([low, tag]);
            }
            NEAR_TAG => {
                let distance = next()? as usize * 2;
                let source = out.pos.checked_sub(distance).filter(|_| distance > 0);
                let Some(source) = source else {
                    return Err(WolfError::InvalidDistance {
                        source_pos: out.pos.wrapping_sub(distance),
                        output_pos: out.pos,
                    });
                };
                out.copy_words(source, count as usize)?;
            }
            FAR_TAG => {
                let low = next()?;
                let high = next()?;
                let source = u16::from_le_bytes([low, high]) as usize * 2;
                if source >= out.pos {
                    return Err(WolfError::InvalidDistance {
                        source_pos: source,
                        output_pos: out.pos,
                    });
                }
                out.copy_words(source, count as usize)?;
            }
            _ => out.push_word([count, tag]),
        }
    }

    log::trace!("carmack: {} -> {} bytes", data.len(), length);
    Ok(out.buf)
}

/// Output buffer with its write cursor
struct CarmackOutput {
    buf: Vec<u8>,
    pos: usize,
}

impl CarmackOutput {
    fn new(length: usize) -> Self {
        Self {
            buf: vec![0u8; length],
            pos: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Literal word; an odd declared length keeps only the low byte
    fn push_word(&mut self, word: [u8; 2]) {
        for byte in word {
            if self.pos < self.buf.len() {
                self.buf[self.pos] = byte;
                self.pos += 1;
            }
        }
    }

    /// Copy `count` words from byte `source`, in writing order
    fn copy_words(&mut self, source: usize, count: usize) -> Result<()> {
        let needed = count * 2;
        let capacity = self.buf.len() - self.pos;
        if needed > capacity {
            return Err(WolfError::BufferOverflow { needed, capacity });
        }
        for i in 0..needed {
            self.buf[self.pos + i] = self.buf[source + i];
        }
        self.pos += needed;
        Ok(())
    }
}
