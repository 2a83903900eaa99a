//! Directory listing seam used by the walk. [`OsDirReader`] is the real filesystem.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// What a directory entry is, determined without following symbolic links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Symlink,
}

/// One immediate child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntryInfo {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Lists the immediate entries of a directory. Order does not matter; the walk sorts by name.
pub trait DirReader: Send + Sync {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

impl<R: DirReader + ?Sized> DirReader for Arc<R> {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        (**self).read_dir(dir)
    }
}

/// [`DirReader`] backed by `std::fs::read_dir`. Any failure while iterating fails the whole listing.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsDirReader;

impl DirReader for OsDirReader {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(DirEntryInfo {
                name: entry.file_name(),
                kind,
            });
        }
        Ok(entries)
    }
}
