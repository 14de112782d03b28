use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::hash::{ObjectKind, Oid};
use crate::object::store::{read_object, write_object};
use crate::repo::Repo;
use crate::types::Commit;

/// write a commit to the object store
pub fn write_commit(repo: &Repo, commit: &Commit) -> Result<Oid> {
    write_object(repo, ObjectKind::Commit, &commit.encode())
}

/// read and decode a commit from the object store
pub fn read_commit(repo: &Repo, oid: &Oid) -> Result<Commit> {
    let payload = read_object(repo, oid, ObjectKind::Commit)?;
    Commit::decode(&payload)
}

/// store a commit of `tree` on top of `head`
///
/// refs are left untouched; moving HEAD is up to the caller.
pub fn create_commit(repo: &Repo, message: &str, tree: Oid, head: Option<Oid>) -> Result<Oid> {
    let commit = Commit::new(tree, head, message);
    let oid = write_commit(repo, &commit)?;
    tracing::debug!(%oid, %tree, parent = ?head, "created commit");
    Ok(oid)
}

/// walk every commit reachable from `starts`, each exactly once
pub fn walk_ancestors<'a, I>(repo: &'a Repo, starts: I) -> Ancestors<'a>
where
    I: IntoIterator<Item = Oid>,
{
    Ancestors {
        repo,
        queue: starts.into_iter().collect(),
        seen: HashSet::new(),
    }
}

/// breadth-first iterator over commit ancestry
///
/// a commit is yielded only after a descendant (or a start) discovered it.
pub struct Ancestors<'a> {
    repo: &'a Repo,
    queue: VecDeque<Oid>,
    seen: HashSet<Oid>,
}

impl Iterator for Ancestors<'_> {
    type Item = Result<Oid>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(oid) = self.queue.pop_front() {
            if !self.seen.insert(oid) {
                continue;
            }

            match read_commit(self.repo, &oid) {
                Ok(commit) => {
                    if let Some(parent) = commit.parent {
                        self.queue.push_back(parent);
                    }
                    return Some(Ok(oid));
                }
                Err(e) => {
                    self.queue.clear();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
