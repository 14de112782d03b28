use std::fs;
use std::path::Path;

use crate::error::{Error, IoResultExt, Result};
use crate::fs::{
    check_no_symlink_parents, create_symlink, read_symlink_target, write_file, FileMetadata,
    FileType,
};
use crate::hash::{ObjectKind, Oid};
use crate::ignore::{Exclude, IgnoreRules};
use crate::object::{self, flatten_tree, read_blob, read_object, write_blob};
use crate::refs::resolve_name;
use crate::repo::Repo;
use crate::types::{Mode, Tree, TreeEntry};

/// snapshot a directory into the object store, returning the root tree oid
///
/// entries flagged by `exclude` are skipped, as is the repository's own metadata
/// directory. a `.twig` directory anywhere else is captured unless excluded.
/// symlinks are stored by their target text, regular files by content.
pub fn capture_directory<E>(repo: &Repo, dir: &Path, exclude: &E) -> Result<Oid>
where
    E: Exclude + ?Sized,
{
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(dir).with_path(dir)? {
        let dir_entry = dir_entry.with_path(dir)?;
        let path = dir_entry.path();

        if path == repo.git_dir() || exclude.is_excluded(&path) {
            tracing::trace!(path = %path.display(), "excluded");
            continue;
        }

        let name = dir_entry
            .file_name()
            .into_string()
            .map_err(|n| Error::InvalidEntryName(n.to_string_lossy().into_owned()))?;

        let meta = FileMetadata::from_path(&path)?;
        let entry = match meta.file_type {
            FileType::Symlink => {
                let target = read_symlink_target(&path)?;
                TreeEntry::new(name, write_blob(repo, &target)?, Mode::Symlink)
            }

            FileType::Regular => {
                let content = fs::read(&path).with_path(&path)?;
                let mode = if meta.is_executable() {
                    Mode::Executable
                } else {
                    Mode::Regular
                };
                TreeEntry::new(name, write_blob(repo, &content)?, mode)
            }

            FileType::Directory => {
                let subtree = capture_directory(repo, &path, exclude)?;
                TreeEntry::new(name, subtree, Mode::Directory)
            }

            FileType::Other => return Err(Error::UnsupportedEntryType(path)),
        };

        entries.push(entry);
    }

    // Tree::new sorts by name so iteration order never affects the oid
    let tree = Tree::new(entries)?;
    object::write_tree(repo, &tree)
}

/// write every file of a tree below `dest`, returning how many were written
///
/// existing files at the same paths are overwritten; nothing is deleted.
/// writing through a symlinked directory below `dest` is refused.
pub fn materialize_tree(repo: &Repo, tree: &Oid, dest: &Path) -> Result<usize> {
    let files = flatten_tree(repo, tree)?;

    for (rel, entry) in &files {
        let path = dest.join(rel);
        check_no_symlink_parents(dest, &path)?;
        let content = read_blob(repo, &entry.oid)?;

        match entry.mode {
            Mode::Symlink => create_symlink(&path, &content)?,
            mode => write_file(&path, &content, mode.permissions().unwrap_or(0o644))?,
        }
    }

    tracing::debug!(%tree, dest = %dest.display(), files = files.len(), "materialized tree");
    Ok(files.len())
}

/// snapshot the repository's working tree using its configured ignore rules
pub fn write_tree(repo: &Repo) -> Result<Oid> {
    let rules = IgnoreRules::from_config(&repo.config().ignore)?;
    capture_directory(repo, repo.worktree(), &rules)
}

/// materialize the named tree over the repository's working tree
pub fn read_tree(repo: &Repo, name: &str) -> Result<usize> {
    let oid = resolve_name(repo, name)?;
    // fail early with a type mismatch rather than a half-written checkout
    read_object(repo, &oid, ObjectKind::Tree)?;
    materialize_tree(repo, &oid, repo.worktree())
}
