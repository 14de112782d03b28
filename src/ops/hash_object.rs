use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, Result};
use crate::hash::Oid;
use crate::object::write_blob;
use crate::repo::Repo;

/// store a file's content as a blob and return its oid
pub fn hash_object(repo: &Repo, file: &Path) -> Result<Oid> {
    let content = fs::read(file).with_path(file)?;
    write_blob(repo, &content)
}
