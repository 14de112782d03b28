use std::ffi::OsStr;
use std::fs::{self, Permissions};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::{Component, Path};

use crate::error::{Error, IoResultExt, Result};

/// write a regular file, replacing whatever is at `path`, and set its mode
pub fn write_file(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    remove_if_symlink(path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, content).with_path(path)?;
    fs::set_permissions(path, Permissions::from_mode(mode)).with_path(path)?;
    Ok(())
}

/// create a symlink with the given raw target, replacing any existing file
pub fn create_symlink(path: &Path, target: &[u8]) -> Result<()> {
    if let Ok(meta) = path.symlink_metadata() {
        if !meta.is_dir() {
            fs::remove_file(path).with_path(path)?;
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    symlink(OsStr::from_bytes(target), path).with_path(path)
}

/// fail if any directory between `root` and `path` is a symlink
///
/// `path` must lie below `root`; `root` itself is trusted.
pub fn check_no_symlink_parents(root: &Path, path: &Path) -> Result<()> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| Error::SymlinkInPath(path.to_path_buf()))?;
    let Some(parent) = rel.parent() else {
        return Ok(());
    };

    let mut current = root.to_path_buf();
    for component in parent.components() {
        match component {
            Component::Normal(part) => current.push(part),
            _ => return Err(Error::SymlinkInPath(path.to_path_buf())),
        }
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(Error::SymlinkInPath(current));
            }
            // anything missing is created as a real directory later
            _ => {}
        }
    }
    Ok(())
}

/// a symlink in the way of a regular file would be written through; drop it first
fn remove_if_symlink(path: &Path) -> Result<()> {
    match path.symlink_metadata() {
        Ok(meta) if meta.file_type().is_symlink() => fs::remove_file(path).with_path(path),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/c.txt");

        write_file(&path, b"content", 0o644).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"content");
    }

    #[test]
    fn test_write_file_sets_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.sh");

        write_file(&path, b"#!/bin/sh", 0o755).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);

        write_file(&path, b"#!/bin/sh", 0o644).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_write_file_replaces_symlink() {
        let dir = tempdir().unwrap();
        let outside = dir.path().join("outside.txt");
        fs::write(&outside, "keep").unwrap();
        let path = dir.path().join("file");
        symlink(&outside, &path).unwrap();

        write_file(&path, b"new", 0o644).unwrap();

        assert!(!fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&outside).unwrap(), b"keep");
    }

    #[test]
    fn test_check_no_symlink_parents() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        let outside = dir.path().join("outside");
        fs::create_dir_all(root.join("real")).unwrap();
        fs::create_dir(&outside).unwrap();
        symlink(&outside, root.join("link")).unwrap();

        check_no_symlink_parents(&root, &root.join("real/file")).unwrap();
        check_no_symlink_parents(&root, &root.join("new/dir/file")).unwrap();
        // a symlink as the final component is replaced, not followed
        check_no_symlink_parents(&root, &root.join("link")).unwrap();

        assert!(matches!(
            check_no_symlink_parents(&root, &root.join("link/evil")),
            Err(Error::SymlinkInPath(_))
        ));
        assert!(!outside.join("evil").exists());
    }

    #[test]
    fn test_create_symlink_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("link");
        fs::write(&path, "old").unwrap();

        create_symlink(&path, b"target/path").unwrap();
        assert_eq!(
            fs::read_link(&path).unwrap().to_string_lossy(),
            "target/path"
        );
    }
}
