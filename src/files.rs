//! Locating an edition's archive files on disk
//!
//! The games ship their archives as `<BASE>.<EXT>` where the extension names
//! the edition. File names are matched case-insensitively since installs
//! copied from DOS media are often lower case.

use crate::graphics::{GraphicsLayout, GraphicsStore};
use crate::maps::MapStore;
use crate::pages::{PageLayout, PageStore};
use crate::{Edition, Result, WolfError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Graphics directory
pub const GRAPHICS_HEAD: &str = "VGAHEAD";
/// Graphics Huffman dictionary
pub const GRAPHICS_DICT: &str = "VGADICT";
/// Graphics chunk data
pub const GRAPHICS_DATA: &str = "VGAGRAPH";
/// Page file
pub const PAGE_FILE: &str = "VSWAP";
/// Map head
pub const MAP_HEAD: &str = "MAPHEAD";
/// Map data
pub const MAP_DATA: &str = "GAMEMAPS";

/// The archive set of one edition in one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFiles {
    dir: PathBuf,
    edition: Edition,
}

impl GameFiles {
    /// Archive set for `edition` in `dir`; nothing is checked until opened
    pub fn new<P: AsRef<Path>>(dir: P, edition: Edition) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            edition,
        }
    }

    /// Find the edition from the extension of the page file in `dir`
    pub fn detect<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) else {
                continue;
            };
            if !stem.to_string_lossy().eq_ignore_ascii_case(PAGE_FILE) {
                continue;
            }
            if let Ok(edition) = Edition::from_extension(&ext.to_string_lossy()) {
                log::debug!("detected {edition} from {}", path.display());
                return Ok(Self::new(dir, edition));
            }
        }
        Err(WolfError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no {PAGE_FILE}.* of a known edition in {}", dir.display()),
        )))
    }

    /// Directory holding the archives
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Edition the archives belong to
    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Resolve `<base>.<ext>` in the directory, ignoring case
    pub fn path(&self, base: &str) -> Result<PathBuf> {
        let wanted = format!("{base}.{}", self.edition.extension());
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().eq_ignore_ascii_case(&wanted) {
                return Ok(entry.path());
            }
        }
        Err(WolfError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{wanted} not found in {}", self.dir.display()),
        )))
    }

    /// Open the graphics archive with the edition's layout
    pub fn open_graphics(&self) -> Result<GraphicsStore> {
        GraphicsStore::open(
            self.path(GRAPHICS_HEAD)?,
            self.path(GRAPHICS_DICT)?,
            self.path(GRAPHICS_DATA)?,
            GraphicsLayout::for_edition(self.edition),
        )
    }

    /// Open the page file
    pub fn open_pages(&self, layout: PageLayout) -> Result<PageStore> {
        PageStore::open(self.path(PAGE_FILE)?, layout)
    }

    /// Open the level archive, limited to the edition's map count
    pub fn open_maps(&self) -> Result<MapStore> {
        MapStore::open(
            self.path(MAP_HEAD)?,
            self.path(MAP_DATA)?,
            Some(self.edition.map_count()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_path_ignores_case() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vswap.wl6"), b"").unwrap();
        fs::write(dir.path().join("MapHead.WL6"), b"").unwrap();

        let files = GameFiles::new(dir.path(), Edition::Registered);
        assert_eq!(files.path(PAGE_FILE).unwrap(), dir.path().join("vswap.wl6"));
        assert_eq!(files.path(MAP_HEAD).unwrap(), dir.path().join("MapHead.WL6"));
        assert!(files.path(MAP_DATA).is_err());
    }

    #[test]
    fn test_detect_edition() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.TXT"), b"").unwrap();
        fs::write(dir.path().join("VSWAP.SOD"), b"").unwrap();
        let files = GameFiles::detect(dir.path()).unwrap();
        assert_eq!(files.edition(), Edition::SpearOfDestiny);

        let empty = tempdir().unwrap();
        assert!(GameFiles::detect(empty.path()).is_err());
    }
}
