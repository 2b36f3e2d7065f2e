//! Common types and constants for the Wolfenstein 3D archive families
//!
//! This module defines the error type, the per-edition configuration records
//! and the constants shared by the decoders and the three archive stores.

use std::fmt;
use thiserror::Error;

/// Error type for archive and decoder operations
#[derive(Debug, Error)]
pub enum WolfError {
    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Prefix-code dictionary does not reach the root node
    #[error("Huffman dictionary too short: {0} nodes (root is node {root})", root = ROOT_NODE)]
    DictionaryTooShort(usize),

    /// Prefix-code traversal followed a link outside the node table
    #[error("Huffman node index out of range: {0}")]
    NodeOutOfRange(usize),

    /// Prefix-code traversal never reached a leaf
    #[error("Huffman tree cycle detected at node {0}")]
    CyclicTree(usize),

    /// Back-reference points at or past the output cursor
    #[error("Invalid back-reference: source {source_pos} with output at {output_pos}")]
    InvalidDistance {
        /// Byte position the reference would copy from
        source_pos: usize,
        /// Byte position of the output cursor
        output_pos: usize,
    },

    /// Back-reference or literal would run past the declared output size
    #[error("Output buffer overflow: {needed} bytes needed, {capacity} available")]
    BufferOverflow {
        /// Bytes the token needs to write
        needed: usize,
        /// Bytes left in the output
        capacity: usize,
    },

    /// Run-length stream ended before the target length
    #[error("RLEW stream exhausted after {written} of {expected} bytes")]
    RunLengthExhausted {
        /// Bytes written before the stream ran out
        written: usize,
        /// Requested output length
        expected: usize,
    },

    /// An offset or length points outside its backing resource
    #[error("{what} out of range: {start}..{end} exceeds {len} bytes")]
    OutOfRange {
        /// What was being read
        what: &'static str,
        /// Start of the span
        start: usize,
        /// End of the span
        end: usize,
        /// Size of the resource
        len: usize,
    },

    /// A fixed header is shorter than its declared layout
    #[error("{0} header too short")]
    HeaderTooShort(&'static str),

    /// Unknown edition file extension
    #[error("Unknown edition: {0}")]
    UnknownEdition(String),

    /// Query for an index the store does not hold
    #[error("No {kind} at index {index}")]
    NoSuchUnit {
        /// Unit kind ("chunk", "page", "sound", ...)
        kind: &'static str,
        /// Requested index
        index: usize,
    },

    /// Invalid data format or corruption
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for archive operations
pub type Result<T> = std::result::Result<T, WolfError>;

/// Index of the root node in every Huffman dictionary
pub const ROOT_NODE: usize = 254;

/// Directory entry marking a chunk with no data
pub const CHUNK_HOLE: u32 = 0x00FF_FFFF;

/// Palette index used for transparent sprite pixels
pub const TRANSPARENT: u8 = 0xFF;

/// Number of planes in every map
pub const PLANE_COUNT: usize = 3;

/// Number of palette entries
pub const PALETTE_SIZE: usize = 256;

/// Game edition, identified by the archive file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    /// Wolfenstein 3D shareware episode (`.WL1`)
    Shareware,
    /// Wolfenstein 3D registered, six episodes (`.WL6`)
    Registered,
    /// Spear of Destiny (`.SOD`)
    SpearOfDestiny,
}

impl Edition {
    /// All known editions
    pub const ALL: [Edition; 3] = [
        Edition::Shareware,
        Edition::Registered,
        Edition::SpearOfDestiny,
    ];

    /// File extension without the dot, upper case
    pub fn extension(&self) -> &'static str {
        match self {
            Edition::Shareware => "WL1",
            Edition::Registered => "WL6",
            Edition::SpearOfDestiny => "SOD",
        }
    }

    /// Look up an edition by extension, case-insensitively
    pub fn from_extension(ext: &str) -> Result<Self> {
        let ext = ext.trim_start_matches('.');
        Edition::ALL
            .into_iter()
            .find(|e| e.extension().eq_ignore_ascii_case(ext))
            .ok_or_else(|| WolfError::UnknownEdition(ext.to_string()))
    }

    /// Number of maps shipped with this edition
    pub fn map_count(&self) -> usize {
        match self {
            Edition::Shareware => 10,
            Edition::Registered => 60,
            Edition::SpearOfDestiny => 21,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edition::Shareware => "Wolfenstein 3D (shareware)",
            Edition::Registered => "Wolfenstein 3D (registered)",
            Edition::SpearOfDestiny => "Spear of Destiny",
        };
        f.write_str(name)
    }
}

/// Which archive a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// VGAHEAD / VGADICT / VGAGRAPH
    Graphics,
    /// VSWAP
    Pages,
    /// MAPHEAD / GAMEMAPS
    Maps,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArchiveKind::Graphics => "VGAGRAPH",
            ArchiveKind::Pages => "VSWAP",
            ArchiveKind::Maps => "GAMEMAPS",
        })
    }
}

/// A single decodable unit inside an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRef {
    /// Graphics chunk
    Chunk(usize),
    /// Page file page
    Page(usize),
    /// Map header
    Map(usize),
    /// One plane of a map
    Plane {
        /// Map index
        map: usize,
        /// Plane index (0..3)
        plane: usize,
    },
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitRef::Chunk(i) => write!(f, "chunk {i}"),
            UnitRef::Page(i) => write!(f, "page {i}"),
            UnitRef::Map(i) => write!(f, "map {i}"),
            UnitRef::Plane { map, plane } => write!(f, "map {map} plane {plane}"),
        }
    }
}

/// A unit that failed to decode while its store was being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// Archive the unit lives in
    pub archive: ArchiveKind,
    /// The failed unit
    pub unit: UnitRef,
    /// Rendered error message
    pub reason: String,
}

impl UnitFailure {
    pub(crate) fn new(archive: ArchiveKind, unit: UnitRef, err: &WolfError) -> Self {
        log::warn!("{archive}: failed to decode {unit}: {err}");
        Self {
            archive,
            unit,
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.archive, self.unit, self.reason)
    }
}

/// Check that `start..start + len` lies inside a buffer of `total` bytes
pub(crate) fn check_span(
    what: &'static str,
    start: usize,
    len: usize,
    total: usize,
) -> Result<std::ops::Range<usize>> {
    let end = start.checked_add(len).ok_or(WolfError::OutOfRange {
        what,
        start,
        end: usize::MAX,
        len: total,
    })?;
    if end > total {
        return Err(WolfError::OutOfRange {
            what,
            start,
            end,
            len: total,
        });
    }
    Ok(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_extension() {
        assert_eq!(Edition::from_extension("wl6").unwrap(), Edition::Registered);
        assert_eq!(Edition::from_extension(".SOD").unwrap(), Edition::SpearOfDestiny);
        assert_eq!(Edition::from_extension("WL1").unwrap(), Edition::Shareware);
        assert!(Edition::from_extension("N3D").is_err());

        for edition in Edition::ALL {
            assert_eq!(Edition::from_extension(edition.extension()).unwrap(), edition);
        }
    }

    #[test]
    fn test_check_span() {
        assert_eq!(check_span("page", 2, 3, 5).unwrap(), 2..5);
        assert!(check_span("page", 2, 4, 5).is_err());
        assert!(check_span("page", usize::MAX, 1, 5).is_err());
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(UnitRef::Chunk(3).to_string(), "chunk 3");
        assert_eq!(
            UnitRef::Plane { map: 1, plane: 2 }.to_string(),
            "map 1 plane 2"
        );
    }
}
