use crate::error::Result;
use crate::hash::Oid;
use crate::refs::{resolve_name, update_ref};
use crate::repo::Repo;

/// point `refs/tags/<name>` at whatever `target` resolves to
pub fn create_tag(repo: &Repo, name: &str, target: &str) -> Result<Oid> {
    let oid = resolve_name(repo, target)?;
    update_ref(repo, &format!("refs/tags/{}", name), &oid)?;
    tracing::info!(name, %oid, "tagged");
    Ok(oid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::write_blob;
    use crate::refs::get_ref;
    use crate::Error;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_create_tag() {
        let (_dir, repo) = test_repo();

        let oid = write_blob(&repo, b"anything").unwrap();
        create_tag(&repo, "v1.0", &oid.to_hex()).unwrap();

        assert_eq!(get_ref(&repo, "refs/tags/v1.0").unwrap(), Some(oid));
        assert_eq!(resolve_name(&repo, "v1.0").unwrap(), oid);
    }

    #[test]
    fn test_tag_of_tag() {
        let (_dir, repo) = test_repo();

        let oid = write_blob(&repo, b"x").unwrap();
        create_tag(&repo, "first", &oid.to_hex()).unwrap();
        create_tag(&repo, "second", "first").unwrap();

        assert_eq!(resolve_name(&repo, "second").unwrap(), oid);
    }

    #[test]
    fn test_tag_overwrites() {
        let (_dir, repo) = test_repo();

        let a = write_blob(&repo, b"a").unwrap();
        let b = write_blob(&repo, b"b").unwrap();
        create_tag(&repo, "moving", &a.to_hex()).unwrap();
        create_tag(&repo, "moving", &b.to_hex()).unwrap();

        assert_eq!(resolve_name(&repo, "moving").unwrap(), b);
    }

    #[test]
    fn test_tag_invalid_name() {
        let (_dir, repo) = test_repo();

        let oid = write_blob(&repo, b"x").unwrap();
        assert!(matches!(
            create_tag(&repo, "", &oid.to_hex()),
            Err(Error::InvalidRef(_))
        ));
        assert!(matches!(
            create_tag(&repo, "../../escape", &oid.to_hex()),
            Err(Error::InvalidRef(_))
        ));
    }
}
