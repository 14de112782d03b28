use crate::error::Result;
use crate::hash::Oid;
use crate::object::{read_commit, walk_ancestors};
use crate::refs::resolve_name;
use crate::repo::Repo;
use crate::types::Commit;

/// commit with its oid for log output
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub oid: Oid,
    pub commit: Commit,
}

/// history from `start` (HEAD if none) back to the root, newest first
pub fn log(repo: &Repo, start: Option<&str>, max_count: Option<usize>) -> Result<Vec<LogEntry>> {
    let start = resolve_name(repo, start.unwrap_or("@"))?;

    walk_ancestors(repo, [start])
        .take(max_count.unwrap_or(usize::MAX))
        .map(|oid| {
            let oid = oid?;
            let commit = read_commit(repo, &oid)?;
            Ok(LogEntry { oid, commit })
        })
        .collect()
}

/// format a log entry for display
impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "commit {}", self.oid)?;
        writeln!(f)?;
        for line in self.commit.message.lines() {
            writeln!(f, "    {}", line)?;
        }
        Ok(())
    }
}
