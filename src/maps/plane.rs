//! Map headers and plane grids

use crate::carmack::carmack_expand;
use crate::cursor::ByteCursor;
use crate::rlew::rlew_expand;
use crate::{Result, WolfError, PLANE_COUNT};

/// Size of the fixed per-map header
pub const MAP_HEADER_SIZE: usize = 38;

/// Size of the NUL-padded map name field
pub const MAP_NAME_SIZE: usize = 16;

/// Length word preceding the grid in an RLEW-expanded plane
pub const PLANE_LENGTH_PREFIX: usize = 2;

/// Largest grid in bytes the plane length word can describe
pub const MAX_PLANE_BYTES: usize = u16::MAX as usize;

/// Fixed header of one map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapHeader {
    /// Absolute offset of each plane in the data file
    pub plane_offsets: [i32; PLANE_COUNT],
    /// Compressed length of each plane
    pub plane_lengths: [u16; PLANE_COUNT],
    /// Width in tiles
    pub width: u16,
    /// Height in tiles
    pub height: u16,
    /// Name up to the first NUL
    pub name: String,
}

impl MapHeader {
    /// Parse a header from the start of `data`
    ///
    /// Dimensions whose plane would not fit the 16-bit length word are
    /// `InvalidData`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data, "map header");
        let mut plane_offsets = [0i32; PLANE_COUNT];
        for offset in &mut plane_offsets {
            *offset = cursor.read_le_i32()?;
        }
        let mut plane_lengths = [0u16; PLANE_COUNT];
        for length in &mut plane_lengths {
            *length = cursor.read_le_u16()?;
        }
        let width = cursor.read_le_u16()?;
        let height = cursor.read_le_u16()?;

        let raw = cursor.read_bytes(MAP_NAME_SIZE)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let name: String = raw[..end].iter().map(|&b| b as char).collect();

        let grid = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(2);
        if grid > MAX_PLANE_BYTES {
            return Err(WolfError::InvalidData(format!(
                "map {name:?} is {width}x{height}, {grid} bytes per plane"
            )));
        }

        Ok(Self {
            plane_offsets,
            plane_lengths,
            width,
            height,
            name,
        })
    }

    /// Whether plane `n` has no stored data; planes past the last are empty
    pub fn plane_is_empty(&self, n: usize) -> bool {
        match (self.plane_offsets.get(n), self.plane_lengths.get(n)) {
            (Some(&offset), Some(&length)) => offset <= 0 || length == 0,
            _ => true,
        }
    }
}

/// One grid of tile codes, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    cells: Vec<u16>,
}

impl Plane {
    /// All-zero plane
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Expand a compressed plane: Carmack, then RLEW to `2 + w*h*2` bytes
    pub fn decode(compressed: &[u8], rlew_tag: u16, width: usize, height: usize) -> Result<Self> {
        let carmacked = carmack_expand(compressed)?;
        let length = PLANE_LENGTH_PREFIX + width * height * 2;
        let expanded = rlew_expand(rlew_tag, length, &carmacked)?;
        let cells = expanded[PLANE_LENGTH_PREFIX..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Code at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// All codes, row-major
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u16]> + '_ {
        self.cells.chunks(self.width.max(1))
    }
}

/// A decoded map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub(crate) header: MapHeader,
    pub(crate) planes: [Option<Plane>; PLANE_COUNT],
}

impl Map {
    /// Map name
    pub fn name(&self) -> &str {
        &self.header.name
    }

    /// Width in tiles
    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    /// Height in tiles
    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    /// Raw header
    pub fn header(&self) -> &MapHeader {
        &self.header
    }

    /// Plane `n`, or `None` if it failed to decode or `n` is out of range
    pub fn plane(&self, n: usize) -> Option<&Plane> {
        self.planes.get(n)?.as_ref()
    }
}
