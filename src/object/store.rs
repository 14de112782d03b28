use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::{compute_object_hash, object_header, ObjectKind, Oid};
use crate::repo::Repo;

/// write an object to the store
///
/// the stored file is zstd(`"<kind> <len>\0" ‖ payload`) at `objects/<2 hex>/<38 hex>`.
/// writing content that already exists is a no-op; the oid is returned either way.
pub fn write_object(repo: &Repo, kind: ObjectKind, payload: &[u8]) -> Result<Oid> {
    let oid = compute_object_hash(kind, payload);

    let (dir, file) = oid.to_path_components();
    let shard_dir = repo.objects_path().join(&dir);
    let path = shard_dir.join(&file);

    // deduplication: if the object already exists, we're done
    if path.exists() {
        tracing::trace!(%oid, %kind, "object already stored");
        return Ok(oid);
    }

    let mut raw = object_header(kind, payload.len());
    raw.extend_from_slice(payload);

    let level = repo.config().core.compression_level;
    let compressed = zstd::encode_all(&raw[..], level).with_path(&path)?;

    fs::create_dir_all(&shard_dir).with_path(&shard_dir)?;

    // write to tmp then rename into place
    let tmp_dir = repo.tmp_path();
    fs::create_dir_all(&tmp_dir).with_path(&tmp_dir)?;
    let tmp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(&compressed).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }
    fs::rename(&tmp_path, &path).with_path(&path)?;

    tracing::debug!(%oid, %kind, size = payload.len(), "wrote object");
    Ok(oid)
}

/// read an object, failing if its stored kind differs from `expected`
///
/// returns the payload with the header stripped.
pub fn read_object(repo: &Repo, oid: &Oid, expected: ObjectKind) -> Result<Vec<u8>> {
    let (actual, payload) = read_object_any(repo, oid)?;
    if actual != expected {
        return Err(Error::ObjectTypeMismatch {
            oid: *oid,
            expected,
            actual,
        });
    }
    Ok(payload)
}

/// read an object of any kind
pub fn read_object_any(repo: &Repo, oid: &Oid) -> Result<(ObjectKind, Vec<u8>)> {
    let path = object_path(repo, oid);

    let compressed = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*oid)
        } else {
            Error::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    let mut raw = zstd::decode_all(&compressed[..]).with_path(&path)?;

    let nul = raw
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::CorruptObject(format!("{}: missing header", oid)))?;
    let header = std::str::from_utf8(&raw[..nul])
        .map_err(|_| Error::CorruptObject(format!("{}: header is not utf-8", oid)))?;
    let (kind_text, len_text) = header
        .split_once(' ')
        .ok_or_else(|| Error::CorruptObject(format!("{}: malformed header {:?}", oid, header)))?;

    let kind: ObjectKind = kind_text
        .parse()
        .map_err(|_| Error::CorruptObject(format!("{}: unknown kind {:?}", oid, kind_text)))?;
    let len: usize = len_text
        .parse()
        .map_err(|_| Error::CorruptObject(format!("{}: bad length {:?}", oid, len_text)))?;

    let payload = raw.split_off(nul + 1);
    if payload.len() != len {
        return Err(Error::CorruptObject(format!(
            "{}: header says {} bytes, found {}",
            oid,
            len,
            payload.len()
        )));
    }

    Ok((kind, payload))
}

/// get the filesystem path for an object
pub fn object_path(repo: &Repo, oid: &Oid) -> PathBuf {
    let (dir, file) = oid.to_path_components();
    repo.objects_path().join(dir).join(file)
}

/// check if an object exists in the store
pub fn object_exists(repo: &Repo, oid: &Oid) -> bool {
    object_path(repo, oid).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_write_and_read_object() {
        let (_dir, repo) = test_repo();

        let oid = write_object(&repo, ObjectKind::Blob, b"hello, world!").unwrap();
        assert!(object_exists(&repo, &oid));

        let payload = read_object(&repo, &oid, ObjectKind::Blob).unwrap();
        assert_eq!(payload, b"hello, world!");
    }

    #[test]
    fn test_roundtrip_every_kind() {
        let (_dir, repo) = test_repo();

        for kind in [ObjectKind::Blob, ObjectKind::Tree, ObjectKind::Commit] {
            let oid = write_object(&repo, kind, b"\0binary\xffpayload").unwrap();
            assert_eq!(
                read_object(&repo, &oid, kind).unwrap(),
                b"\0binary\xffpayload"
            );
        }
    }

    #[test]
    fn test_empty_payload() {
        let (_dir, repo) = test_repo();

        let oid = write_object(&repo, ObjectKind::Blob, b"").unwrap();
        assert!(read_object(&repo, &oid, ObjectKind::Blob).unwrap().is_empty());
    }

    #[test]
    fn test_write_is_idempotent() {
        let (_dir, repo) = test_repo();

        let h1 = write_object(&repo, ObjectKind::Blob, b"duplicate content").unwrap();
        let before = fs::read(object_path(&repo, &h1)).unwrap();
        let h2 = write_object(&repo, ObjectKind::Blob, b"duplicate content").unwrap();
        let after = fs::read(object_path(&repo, &h2)).unwrap();

        assert_eq!(h1, h2);
        assert_eq!(before, after);
    }

    #[test]
    fn test_object_path_structure() {
        let (_dir, repo) = test_repo();

        let oid = write_object(&repo, ObjectKind::Blob, b"test").unwrap();
        let path = object_path(&repo, &oid);

        let hex = oid.to_hex();
        assert!(path.ends_with(format!("{}/{}", &hex[..2], &hex[2..])));
        assert!(path.starts_with(repo.objects_path()));
    }

    #[test]
    fn test_stored_bytes_are_compressed_header_and_payload() {
        let (_dir, repo) = test_repo();

        let oid = write_object(&repo, ObjectKind::Blob, b"hi").unwrap();
        let stored = fs::read(object_path(&repo, &oid)).unwrap();
        let raw = zstd::decode_all(&stored[..]).unwrap();
        assert_eq!(raw, b"blob 2\0hi");
    }

    #[test]
    fn test_read_nonexistent_object() {
        let (_dir, repo) = test_repo();

        let result = read_object(&repo, &Oid::ZERO, ObjectKind::Blob);
        assert!(matches!(result, Err(Error::ObjectNotFound(_))));
    }

    #[test]
    fn test_type_mismatch() {
        let (_dir, repo) = test_repo();

        let oid = write_object(&repo, ObjectKind::Blob, b"data").unwrap();
        let result = read_object(&repo, &oid, ObjectKind::Commit);

        assert!(matches!(
            result,
            Err(Error::ObjectTypeMismatch {
                expected: ObjectKind::Commit,
                actual: ObjectKind::Blob,
                ..
            })
        ));
    }

    #[test]
    fn test_read_object_any() {
        let (_dir, repo) = test_repo();

        let oid = write_object(&repo, ObjectKind::Tree, b"").unwrap();
        let (kind, payload) = read_object_any(&repo, &oid).unwrap();
        assert_eq!(kind, ObjectKind::Tree);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_length_mismatch_is_corrupt() {
        let (_dir, repo) = test_repo();

        let oid = write_object(&repo, ObjectKind::Blob, b"abc").unwrap();
        let path = object_path(&repo, &oid);
        fs::write(&path, zstd::encode_all(&b"blob 10\0abc"[..], 3).unwrap()).unwrap();

        let result = read_object(&repo, &oid, ObjectKind::Blob);
        assert!(matches!(result, Err(Error::CorruptObject(_))));
    }
}
