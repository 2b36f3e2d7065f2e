//! Texture and sprite page decoding
//!
//! Textures are stored column-major with no header. Sprites are "compiled"
//! shapes: a column range, one offset per column pointing at a chain of
//! posts, and a pool of opaque pixel bytes consumed post by post.

use crate::cursor::{le_i16_at, le_u16_at};
use crate::palette::Palette;
use crate::{Result, WolfError, TRANSPARENT};

/// Size of one post record: end row, unused word, start row
pub const POST_SIZE: usize = 6;

/// Row-major image decoded from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Palette indices, row-major
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Palette index at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Whether `(x, y)` is covered by a sprite post
    pub fn is_opaque(&self, x: usize, y: usize) -> bool {
        self.pixel(x, y) != TRANSPARENT
    }

    /// Resolve to packed RGB bytes; transparent pixels map like any index
    pub fn to_rgb(&self, palette: &Palette) -> Vec<u8> {
        palette.apply(&self.pixels)
    }
}

/// Transpose a column-major texture page into a row-major bitmap
pub fn decode_texture(data: &[u8], width: usize, height: usize) -> Result<Bitmap> {
    let needed = width * height;
    if data.len() < needed {
        return Err(WolfError::OutOfRange {
            what: "texture",
            start: 0,
            end: needed,
            len: data.len(),
        });
    }

    let mut pixels = Vec::with_capacity(needed);
    for y in 0..height {
        for x in 0..width {
            pixels.push(data[x * height + y]);
        }
    }
    Ok(Bitmap {
        width,
        height,
        pixels,
    })
}

/// Decode a compiled sprite page into a bitmap with transparent background
pub fn decode_sprite(data: &[u8], width: usize, height: usize) -> Result<Bitmap> {
    let left = le_u16_at(data, 0, "sprite header")? as usize;
    let right = le_u16_at(data, 2, "sprite header")? as usize;
    if right < left || right >= width {
        return Err(WolfError::InvalidData(format!(
            "sprite columns {left}..={right} outside width {width}"
        )));
    }

    let mut pixels = vec![TRANSPARENT; width * height];
    // Pixel bytes follow the header and the column offset table.
    let mut pool = (right - left + 3) * 2;

    for (n, x) in (left..=right).enumerate() {
        let mut post = le_u16_at(data, 4 + n * 2, "sprite column table")? as usize;
        loop {
            let end = le_i16_at(data, post, "sprite post")?;
            if end == 0 {
                break;
            }
            let start = le_i16_at(data, post + 4, "sprite post")?;
            let (start, end) = (start >> 1, end >> 1);
            if start < 0 || end as usize > height {
                return Err(WolfError::InvalidData(format!(
                    "sprite post rows {start}..{end} outside height {height}"
                )));
            }

            for y in start as usize..end as usize {
                let pixel = *data.get(pool).ok_or(WolfError::OutOfRange {
                    what: "sprite pixel pool",
                    start: pool,
                    end: pool + 1,
                    len: data.len(),
                })?;
                pixels[y * width + x] = pixel;
                pool += 1;
            }
            post += POST_SIZE;
        }
    }

    Ok(Bitmap {
        width,
        height,
        pixels,
    })
}
