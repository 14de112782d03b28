use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::hash::{ObjectKind, Oid};
use crate::object::store::{read_object, write_object};
use crate::repo::Repo;
use crate::types::{Mode, Tree};

/// write a tree to the object store
pub fn write_tree(repo: &Repo, tree: &Tree) -> Result<Oid> {
    write_object(repo, ObjectKind::Tree, &tree.encode())
}

/// read and decode a tree from the object store
pub fn read_tree(repo: &Repo, oid: &Oid) -> Result<Tree> {
    let payload = read_object(repo, oid, ObjectKind::Tree)?;
    Tree::decode(&payload)
}

/// a non-directory entry found while flattening a tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatEntry {
    pub oid: Oid,
    pub mode: Mode,
}

/// flatten a tree into relative path -> blob entry
///
/// nested trees are descended into; directories never appear as keys.
pub fn flatten_tree(repo: &Repo, oid: &Oid) -> Result<BTreeMap<PathBuf, FlatEntry>> {
    let mut out = BTreeMap::new();
    flatten_into(repo, oid, Path::new(""), &mut out)?;
    Ok(out)
}

fn flatten_into(
    repo: &Repo,
    oid: &Oid,
    prefix: &Path,
    out: &mut BTreeMap<PathBuf, FlatEntry>,
) -> Result<()> {
    let tree = read_tree(repo, oid)?;
    for entry in tree.into_entries() {
        let path = prefix.join(&entry.name);
        if entry.is_directory() {
            flatten_into(repo, &entry.oid, &path, out)?;
        } else {
            out.insert(
                path,
                FlatEntry {
                    oid: entry.oid,
                    mode: entry.mode,
                },
            );
        }
    }
    Ok(())
}
