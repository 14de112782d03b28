use crate::error::Result;
use crate::hash::{ObjectKind, Oid};
use crate::object::{read_commit, read_object_any, walk_ancestors};
use crate::refs::iter_all_refs;
use crate::repo::Repo;

/// render every ref and every commit reachable from them as a graphviz digraph
///
/// refs pointing at trees or blobs get a node and an edge but are not walked.
pub fn graph(repo: &Repo) -> Result<String> {
    let mut out = String::from("digraph commits {\n");
    let mut roots: Vec<Oid> = Vec::new();

    for item in iter_all_refs(repo) {
        let (name, oid) = item?;
        out.push_str(&format!("  \"{}\" [shape=note]\n", name));
        out.push_str(&format!("  \"{}\" -> \"{}\"\n", name, oid));

        let (kind, _) = read_object_any(repo, &oid)?;
        if kind == ObjectKind::Commit {
            roots.push(oid);
        } else {
            tracing::debug!(ref_name = %name, %kind, "not walking non-commit ref");
        }
    }

    for oid in walk_ancestors(repo, roots) {
        let oid = oid?;
        let commit = read_commit(repo, &oid)?;
        out.push_str(&format!(
            "  \"{}\" [shape=box style=filled label=\"{}\"]\n",
            oid,
            oid.short()
        ));
        if let Some(parent) = commit.parent {
            out.push_str(&format!("  \"{}\" -> \"{}\"\n", oid, parent));
        }
    }

    out.push_str("}\n");
    Ok(out)
}
