use crate::error::Result;
use crate::hash::ObjectKind;
use crate::object::read_object;
use crate::refs::resolve_name;
use crate::repo::Repo;
use crate::types::decode_tree;

/// resolve `name` and return the payload of an object of the given kind
pub fn cat_file(repo: &Repo, kind: ObjectKind, name: &str) -> Result<Vec<u8>> {
    let oid = resolve_name(repo, name)?;
    read_object(repo, &oid, kind)
}

/// render a tree payload one entry per line: `<mode> <kind> <oid>\t<name>`
pub fn format_tree(payload: &[u8]) -> Result<String> {
    let mut out = String::new();
    for entry in decode_tree(payload) {
        let entry = entry?;
        out.push_str(&format!(
            "{:0>6} {} {}\t{}\n",
            entry.mode.as_str(),
            entry.kind,
            entry.oid,
            entry.name
        ));
    }
    Ok(out)
}
