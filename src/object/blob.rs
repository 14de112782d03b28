use crate::error::Result;
use crate::hash::{ObjectKind, Oid};
use crate::object::store::{object_exists, read_object, write_object};
use crate::repo::Repo;

/// write file content (or a symlink target) as a blob
pub fn write_blob(repo: &Repo, content: &[u8]) -> Result<Oid> {
    write_object(repo, ObjectKind::Blob, content)
}

/// read blob content
pub fn read_blob(repo: &Repo, oid: &Oid) -> Result<Vec<u8>> {
    read_object(repo, oid, ObjectKind::Blob)
}

/// check if a blob exists in the object store
pub fn blob_exists(repo: &Repo, oid: &Oid) -> bool {
    object_exists(repo, oid)
}
