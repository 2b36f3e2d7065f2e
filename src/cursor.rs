//! Little-endian field reader over an in-memory resource
//!
//! Every fixed header in the archives is parsed field by field through this
//! cursor rather than overlaid onto a struct.

use crate::{check_span, Result, WolfError};

/// Forward-only reader over a byte slice
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    what: &'static str,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor; `what` names the structure in error messages
    pub fn new(data: &'a [u8], what: &'static str) -> Self {
        Self { data, pos: 0, what }
    }

    /// Create a cursor positioned at `pos`
    pub fn at(data: &'a [u8], pos: usize, what: &'static str) -> Result<Self> {
        if pos > data.len() {
            return Err(WolfError::OutOfRange {
                what,
                start: pos,
                end: pos,
                len: data.len(),
            });
        }
        Ok(Self { data, pos, what })
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let range = check_span(self.what, self.pos, n, self.data.len())?;
        self.pos = range.end;
        Ok(&self.data[range])
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_le_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_le_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Three-byte offset as stored in the graphics directory
    pub fn read_le_u24(&mut self) -> Result<u32> {
        let [a, b, c] = self.read_array()?;
        Ok(u32::from_le_bytes([a, b, c, 0]))
    }

    pub fn read_le_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_le_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }
}

/// Read a little-endian `u16` at a byte offset
pub(crate) fn le_u16_at(data: &[u8], pos: usize, what: &'static str) -> Result<u16> {
    ByteCursor::at(data, pos, what)?.read_le_u16()
}

/// Read a little-endian `i16` at a byte offset
pub(crate) fn le_i16_at(data: &[u8], pos: usize, what: &'static str) -> Result<i16> {
    ByteCursor::at(data, pos, what)?.read_le_i16()
}
