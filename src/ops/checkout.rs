use crate::error::Result;
use crate::hash::Oid;
use crate::object::read_commit;
use crate::ops::snapshot::materialize_tree;
use crate::refs::{resolve_name, update_ref, HEAD};
use crate::repo::Repo;

/// materialize a commit's tree over the working tree and point HEAD at it
///
/// tracked paths are overwritten without checking for local changes.
/// files the commit does not track are left alone.
pub fn checkout(repo: &Repo, name: &str) -> Result<Oid> {
    let oid = resolve_name(repo, name)?;
    let commit = read_commit(repo, &oid)?;

    let files = materialize_tree(repo, &commit.tree, repo.worktree())?;
    update_ref(repo, HEAD, &oid)?;

    tracing::info!(%oid, files, "checked out");
    Ok(oid)
}
