//! 256-colour VGA palettes
//!
//! The games store colours as 6-bit VGA DAC components. Palettes come either
//! from a graphics chunk (raw `r g b` byte triples) or from a text file of
//! `RGB(r, g, b)` entries.

use crate::{Result, WolfError, PALETTE_SIZE};

/// Scale from a 6-bit DAC component to 8 bits
const DAC_SCALE: u8 = 255 / 63;

/// An RGB colour
pub type Rgb = [u8; 3];

/// Fixed 256-entry colour table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [[0, 0, 0]; PALETTE_SIZE],
        }
    }
}

impl Palette {
    /// Build from already-scaled 8-bit colours; missing entries stay black
    pub fn from_colors(colors: &[Rgb]) -> Self {
        let mut palette = Self::default();
        for (dst, src) in palette.colors.iter_mut().zip(colors) {
            *dst = *src;
        }
        palette
    }

    /// Parse raw 6-bit `r g b` triples as stored in a graphics chunk
    pub fn from_vga_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 3 {
            return Err(WolfError::InvalidData(format!(
                "palette needs at least one colour, got {} bytes",
                data.len()
            )));
        }
        let colors: Vec<Rgb> = data
            .chunks_exact(3)
            .take(PALETTE_SIZE)
            .map(|c| [scale(c[0]), scale(c[1]), scale(c[2])])
            .collect();
        Ok(Self::from_colors(&colors))
    }

    /// Parse a palette source listing `RGB(r, g, b)` entries
    ///
    /// Anything between entries (commas, comments, declarations) is skipped.
    pub fn parse_text(text: &str) -> Result<Self> {
        let mut colors = Vec::with_capacity(PALETTE_SIZE);
        let mut rest = text;

        while let Some(start) = rest.find("RGB") {
            rest = &rest[start + 3..];
            let Some(args) = rest.trim_start().strip_prefix('(') else {
                continue;
            };
            let Some(end) = args.find(')') else {
                break;
            };
            let parts: Vec<&str> = args[..end].split(',').map(str::trim).collect();
            if let [r, g, b] = parts[..] {
                if let (Ok(r), Ok(g), Ok(b)) = (r.parse::<u8>(), g.parse::<u8>(), b.parse::<u8>())
                {
                    colors.push([scale(r), scale(g), scale(b)]);
                    if colors.len() == PALETTE_SIZE {
                        break;
                    }
                }
            }
            rest = &args[end + 1..];
        }

        if colors.is_empty() {
            return Err(WolfError::InvalidData(
                "no RGB entries in palette text".to_string(),
            ));
        }
        log::debug!("palette: parsed {} colours from text", colors.len());
        Ok(Self::from_colors(&colors))
    }

    /// Colour at `index`
    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Resolve indexed pixels to packed RGB bytes
    pub fn apply(&self, pixels: &[u8]) -> Vec<u8> {
        pixels.iter().flat_map(|&p| self.color(p)).collect()
    }
}

fn scale(component: u8) -> u8 {
    component.saturating_mul(DAC_SCALE)
}
