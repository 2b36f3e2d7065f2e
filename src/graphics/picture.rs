//! Planar picture de-interleaving
//!
//! Pictures are stored in VGA "Mode X" order: four planes, one per `x % 4`,
//! each holding a quarter-width image. The pixel at `(x, y)` lives at
//! `y * (w / 4) + x / 4 + (x % 4) * (w / 4) * h`.

use crate::cursor::ByteCursor;
use crate::palette::Palette;
use crate::{Result, WolfError};

/// Size of one record in the picture table chunk
pub const PICTURE_TABLE_ENTRY_SIZE: usize = 4;

/// Dimensions of one picture, from the picture table chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureSize {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl PictureSize {
    /// Parse the picture table into `(width, height)` records
    pub fn parse_table(data: &[u8]) -> Result<Vec<PictureSize>> {
        let count = data.len() / PICTURE_TABLE_ENTRY_SIZE;
        let mut cursor = ByteCursor::new(data, "picture table");
        (0..count)
            .map(|_| -> Result<PictureSize> {
                Ok(PictureSize {
                    width: cursor.read_le_u16()?,
                    height: cursor.read_le_u16()?,
                })
            })
            .collect()
    }
}

/// A decoded picture, one palette index per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Palette indices, `width * height` bytes
    pub pixels: Vec<u8>,
}

impl Picture {
    /// Reorder planar chunk bytes into a row-major image
    pub fn deinterleave(data: &[u8], size: PictureSize) -> Result<Self> {
        let width = size.width as usize;
        let height = size.height as usize;
        let quarter = width / 4;
        let plane_size = quarter * height;

        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let src = y * quarter + x / 4 + (x % 4) * plane_size;
                let pixel = data.get(src).ok_or(WolfError::OutOfRange {
                    what: "picture pixel",
                    start: src,
                    end: src + 1,
                    len: data.len(),
                })?;
                pixels.push(*pixel);
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Palette index at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Resolve to packed RGB bytes
    pub fn to_rgb(&self, palette: &Palette) -> Vec<u8> {
        palette.apply(&self.pixels)
    }
}
