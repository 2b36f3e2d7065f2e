//! Proportional font chunks
//!
//! A font chunk starts with a 770-byte header: the glyph height, 256 glyph
//! data offsets (relative to the chunk start) and 256 glyph widths. Each
//! glyph is `width * height` bytes, row-major, nonzero for a set pixel.

use crate::cursor::ByteCursor;
use crate::{check_span, Result, WolfError};

/// Glyphs per font
pub const FONT_GLYPHS: usize = 256;

/// Bytes before the first glyph
pub const FONT_HEADER_SIZE: usize = 2 + FONT_GLYPHS * 2 + FONT_GLYPHS;

/// Value written for a set pixel in a rendered strip
pub const GLYPH_SET: u8 = 0xFF;

/// Position and width of one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Offset of the glyph bitmap; zero or negative means undefined
    pub location: i16,
    /// Width in pixels
    pub width: u8,
}

impl Glyph {
    /// Whether the glyph has bitmap data
    pub fn is_defined(&self) -> bool {
        self.location > 0
    }
}

/// A parsed font borrowing its chunk
#[derive(Debug, Clone)]
pub struct Font<'a> {
    height: usize,
    glyphs: Vec<Glyph>,
    data: &'a [u8],
}

/// All glyphs side by side, one byte per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphStrip {
    /// Sum of all glyph widths
    pub width: usize,
    /// Font height
    pub height: usize,
    /// `GLYPH_SET` or zero, row-major
    pub pixels: Vec<u8>,
}

impl<'a> Font<'a> {
    /// Parse the header of a font chunk
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < FONT_HEADER_SIZE {
            return Err(WolfError::HeaderTooShort("font"));
        }
        let mut cursor = ByteCursor::new(data, "font header");
        let height = cursor.read_le_i16()?;
        if height < 0 {
            return Err(WolfError::InvalidData(format!("negative font height {height}")));
        }

        let locations = (0..FONT_GLYPHS)
            .map(|_| cursor.read_le_i16())
            .collect::<Result<Vec<_>>>()?;
        let widths = cursor.read_bytes(FONT_GLYPHS)?;

        let glyphs = locations
            .into_iter()
            .zip(widths)
            .map(|(location, &width)| Glyph { location, width })
            .collect();

        Ok(Self {
            height: height as usize,
            glyphs,
            data,
        })
    }

    /// Glyph height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph table entry for character `c`
    pub fn glyph(&self, c: u8) -> Glyph {
        self.glyphs[c as usize]
    }

    /// Bitmap of one glyph (`width * height` bytes), or `None` if undefined
    pub fn glyph_bitmap(&self, c: u8) -> Result<Option<&'a [u8]>> {
        let glyph = self.glyph(c);
        if !glyph.is_defined() {
            return Ok(None);
        }
        let len = glyph.width as usize * self.height;
        let range = check_span("glyph", glyph.location as usize, len, self.data.len())?;
        Ok(Some(&self.data[range]))
    }

    /// Render every glyph into one strip; undefined glyphs stay blank
    pub fn render(&self) -> Result<GlyphStrip> {
        let width: usize = self.glyphs.iter().map(|g| g.width as usize).sum();
        let mut pixels = vec![0u8; width * self.height];

        let mut left = 0;
        for c in 0..=u8::MAX {
            let glyph_width = self.glyph(c).width as usize;
            if let Some(bitmap) = self.glyph_bitmap(c)? {
                for y in 0..self.height {
                    for x in 0..glyph_width {
                        if bitmap[y * glyph_width + x] != 0 {
                            pixels[y * width + left + x] = GLYPH_SET;
                        }
                    }
                }
            }
            left += glyph_width;
        }

        Ok(GlyphStrip {
            width,
            height: self.height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Font of height 2 with glyph 'A' (width 2) and an undefined 'B' (width 1)
    fn sample_font() -> Vec<u8> {
        let mut data = vec![0u8; FONT_HEADER_SIZE];
        data[0..2].copy_from_slice(&2i16.to_le_bytes());
        let loc = |c: usize| 2 + c * 2;
        data[loc(b'A' as usize)..loc(b'A' as usize) + 2]
            .copy_from_slice(&(FONT_HEADER_SIZE as i16).to_le_bytes());
        data[2 + 512 + b'A' as usize] = 2;
        data[2 + 512 + b'B' as usize] = 1;
        // 'A' bitmap: row 0 = set, clear; row 1 = clear, set
        data.extend_from_slice(&[1, 0, 0, 7]);
        data
    }

    #[test]
    fn test_parse_header() {
        let data = sample_font();
        let font = Font::parse(&data).unwrap();
        assert_eq!(font.height(), 2);
        assert!(font.glyph(b'A').is_defined());
        assert!(!font.glyph(b'B').is_defined());
        assert_eq!(font.glyph_bitmap(b'A').unwrap(), Some(&[1u8, 0, 0, 7][..]));
        assert_eq!(font.glyph_bitmap(b'B').unwrap(), None);
    }

    #[test]
    fn test_render_strip() {
        let data = sample_font();
        let strip = Font::parse(&data).unwrap().render().unwrap();
        assert_eq!(strip.width, 3);
        assert_eq!(strip.height, 2);
        assert_eq!(strip.pixels, vec![GLYPH_SET, 0, 0, 0, GLYPH_SET, 0]);
    }

    #[test]
    fn test_short_header() {
        assert!(matches!(
            Font::parse(&[0u8; 10]),
            Err(WolfError::HeaderTooShort("font"))
        ));
    }

    #[test]
    fn test_glyph_past_chunk_end() {
        let mut data = sample_font();
        data.truncate(FONT_HEADER_SIZE + 2);
        let font = Font::parse(&data).unwrap();
        assert!(font.glyph_bitmap(b'A').is_err());
        assert!(font.render().is_err());
    }
}
