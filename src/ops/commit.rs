use crate::error::Result;
use crate::hash::Oid;
use crate::object::create_commit;
use crate::ops::snapshot::write_tree;
use crate::refs::{get_ref, update_ref, HEAD};
use crate::repo::Repo;

/// snapshot the working tree and commit it on top of HEAD, then move HEAD
pub fn commit(repo: &Repo, message: &str) -> Result<Oid> {
    let tree = write_tree(repo)?;
    let head = get_ref(repo, HEAD)?;

    let oid = create_commit(repo, message, tree, head)?;
    update_ref(repo, HEAD, &oid)?;

    tracing::info!(%oid, %tree, "committed");
    Ok(oid)
}
