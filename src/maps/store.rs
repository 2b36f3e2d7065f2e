//! Level archive store
//!
//! Decodes every plane of every map at construction.

use super::plane::{Map, MapHeader, Plane, MAP_HEADER_SIZE};
use crate::cursor::ByteCursor;
use crate::{check_span, ArchiveKind, Result, UnitFailure, UnitRef, WolfError, PLANE_COUNT};
use std::fs;
use std::path::Path;

/// Parsed `MAPHEAD` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapHead {
    /// Tag word marking RLEW runs in every plane
    pub rlew_tag: u16,
    /// Absolute header offset of each map slot
    pub offsets: Vec<i32>,
}

impl MapHead {
    /// Parse the head, reading at most `limit` offsets
    ///
    /// Without a limit every whole offset in the file is read.
    pub fn parse(data: &[u8], limit: Option<usize>) -> Result<Self> {
        let mut cursor = ByteCursor::new(data, "map head");
        let rlew_tag = cursor
            .read_le_u16()
            .map_err(|_| WolfError::HeaderTooShort("map head"))?;

        let available = cursor.remaining() / 4;
        let count = limit.map_or(available, |n| n.min(available));
        let offsets = (0..count)
            .map(|_| cursor.read_le_i32())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rlew_tag, offsets })
    }
}

/// Decoded level archive
#[derive(Debug, Clone)]
pub struct MapStore {
    rlew_tag: u16,
    maps: Vec<Option<Map>>,
    failures: Vec<UnitFailure>,
}

impl MapStore {
    /// Open `MAPHEAD` and `GAMEMAPS` and decode every map
    pub fn open<P: AsRef<Path>>(head: P, data: P, limit: Option<usize>) -> Result<Self> {
        let head = fs::read(head)?;
        let data = fs::read(data)?;
        Self::from_bytes(&head, &data, limit)
    }

    /// Decode an archive held in memory
    ///
    /// A short head fails the store. A map whose header lies outside the
    /// data or claims a grid larger than [`MAX_PLANE_BYTES`] is skipped; a
    /// plane that fails to decode is left as `None`. Both are recorded in
    /// [`failures`].
    ///
    /// [`failures`]: MapStore::failures
    /// [`MAX_PLANE_BYTES`]: super::MAX_PLANE_BYTES
    pub fn from_bytes(head: &[u8], data: &[u8], limit: Option<usize>) -> Result<Self> {
        let head = MapHead::parse(head, limit)?;
        let mut failures = Vec::new();

        let maps = head
            .offsets
            .iter()
            .enumerate()
            .map(|(index, &offset)| {
                if offset <= 0 {
                    return None;
                }
                let header =
                    check_span("map header", offset as usize, MAP_HEADER_SIZE, data.len())
                        .and_then(|range| MapHeader::parse(&data[range]));
                match header {
                    Ok(header) => Some(load_map(
                        index,
                        header,
                        head.rlew_tag,
                        data,
                        &mut failures,
                    )),
                    Err(e) => {
                        failures.push(UnitFailure::new(
                            ArchiveKind::Maps,
                            UnitRef::Map(index),
                            &e,
                        ));
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "GAMEMAPS: {} of {} map slots populated, tag {:#06x}, {} failures",
            maps.iter().flatten().count(),
            maps.len(),
            head.rlew_tag,
            failures.len()
        );

        Ok(Self {
            rlew_tag: head.rlew_tag,
            maps,
            failures,
        })
    }

    /// RLEW tag from the head file
    pub fn rlew_tag(&self) -> u16 {
        self.rlew_tag
    }

    /// Number of map slots, populated or not
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Map `index`, or `None` for an empty or unreadable slot
    pub fn map(&self, index: usize) -> Option<&Map> {
        self.maps.get(index)?.as_ref()
    }

    /// Populated maps with their slot indices
    pub fn maps(&self) -> impl Iterator<Item = (usize, &Map)> + '_ {
        self.maps
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.as_ref().map(|m| (i, m)))
    }

    /// Maps and planes that failed to decode
    pub fn failures(&self) -> &[UnitFailure] {
        &self.failures
    }
}

fn load_map(
    index: usize,
    header: MapHeader,
    rlew_tag: u16,
    data: &[u8],
    failures: &mut Vec<UnitFailure>,
) -> Map {
    let width = header.width as usize;
    let height = header.height as usize;

    let mut planes: [Option<Plane>; PLANE_COUNT] = Default::default();
    for (n, slot) in planes.iter_mut().enumerate() {
        if header.plane_is_empty(n) {
            *slot = Some(Plane::zeroed(width, height));
            continue;
        }
        let offset = header.plane_offsets[n] as usize;
        let length = header.plane_lengths[n] as usize;
        let plane = check_span("map plane", offset, length, data.len())
            .and_then(|range| Plane::decode(&data[range], rlew_tag, width, height));
        match plane {
            Ok(plane) => *slot = Some(plane),
            Err(e) => failures.push(UnitFailure::new(
                ArchiveKind::Maps,
                UnitRef::Plane { map: index, plane: n },
                &e,
            )),
        }
    }

    log::trace!("GAMEMAPS: map {index} \"{}\" {width}x{height}", header.name);
    Map { header, planes }
}
