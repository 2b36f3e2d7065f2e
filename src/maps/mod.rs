//! Level archive (`MAPHEAD` / `GAMEMAPS`)
//!
//! Each map has three planes of 16-bit codes (walls, objects, extra info),
//! every plane compressed with Carmack and then RLEW.

mod plane;
mod store;

pub use plane::{
    Map, MapHeader, Plane, MAP_HEADER_SIZE, MAP_NAME_SIZE, MAX_PLANE_BYTES, PLANE_LENGTH_PREFIX,
};
pub use store::{MapHead, MapStore};
