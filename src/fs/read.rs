use std::fs::{self, Metadata};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::error::{IoResultExt, Result};

/// kinds of working-tree entries a snapshot can record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Directory,
    Symlink,
    /// devices, fifos, sockets
    Other,
}

impl FileType {
    /// detect file type from (non-following) metadata
    pub fn from_metadata(meta: &Metadata) -> Self {
        let ft = meta.file_type();
        if ft.is_symlink() {
            FileType::Symlink
        } else if ft.is_file() {
            FileType::Regular
        } else if ft.is_dir() {
            FileType::Directory
        } else {
            FileType::Other
        }
    }
}

/// metadata for a working-tree entry
#[derive(Debug, Clone, Copy)]
pub struct FileMetadata {
    pub file_type: FileType,
    pub mode: u32,
}

impl FileMetadata {
    /// read metadata from path (does not follow symlinks)
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = fs::symlink_metadata(path).with_path(path)?;
        Ok(Self {
            file_type: FileType::from_metadata(&meta),
            mode: meta.permissions().mode(),
        })
    }

    /// owner-executable bit set
    pub fn is_executable(&self) -> bool {
        self.mode & 0o100 != 0
    }
}

/// read a symlink target as raw bytes (the link text, not what it points to)
pub fn read_symlink_target(path: &Path) -> Result<Vec<u8>> {
    let target = fs::read_link(path).with_path(path)?;
    Ok(target.as_os_str().as_bytes().to_vec())
}
