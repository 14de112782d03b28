use std::fs::{self, File};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::{is_oid_hex, Oid};
use crate::repo::Repo;

/// the ref pointing at the current commit
pub const HEAD: &str = "HEAD";

/// write a ref (create or update)
///
/// ref names are paths below the metadata directory, e.g. `HEAD` or
/// `refs/tags/v1.0`. the file content is the bare hex oid.
pub fn update_ref(repo: &Repo, name: &str, oid: &Oid) -> Result<()> {
    validate_ref_name(name)?;

    let path = ref_path(repo, name);

    // ensure parent directories exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }

    // write to tmp then rename into place
    let tmp_dir = repo.tmp_path();
    fs::create_dir_all(&tmp_dir).with_path(&tmp_dir)?;
    let tmp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file
            .write_all(oid.to_hex().as_bytes())
            .with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }
    fs::rename(&tmp_path, &path).with_path(&path)?;

    tracing::debug!(name, %oid, "updated ref");
    Ok(())
}

/// read a ref
///
/// returns `None` if the ref does not exist or is empty (HEAD before the first commit).
pub fn get_ref(repo: &Repo, name: &str) -> Result<Option<Oid>> {
    validate_ref_name(name)?;

    let path = ref_path(repo, name);
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let hex = content.trim();
    if hex.is_empty() {
        return Ok(None);
    }
    Oid::from_hex(hex).map(Some)
}

/// delete a ref
pub fn delete_ref(repo: &Repo, name: &str) -> Result<()> {
    validate_ref_name(name)?;
    let path = ref_path(repo, name);

    fs::remove_file(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::RefNotFound(name.to_string())
        } else {
            Error::Io { path, source: e }
        }
    })
}

/// check if a ref exists
pub fn ref_exists(repo: &Repo, name: &str) -> bool {
    validate_ref_name(name).is_ok() && ref_path(repo, name).is_file()
}

/// resolve a user-supplied name to an oid
///
/// `@` means `HEAD`. tries, in order: the name itself (if it is `HEAD` or under
/// `refs/`), `refs/<name>`,
/// `refs/tags/<name>`, `refs/heads/<name>`. if no ref matches and the name
/// is 40 hex chars it is taken as an oid.
pub fn resolve_name(repo: &Repo, name: &str) -> Result<Oid> {
    let name = if name == "@" { HEAD } else { name };

    let candidates = [
        name.to_string(),
        format!("refs/{}", name),
        format!("refs/tags/{}", name),
        format!("refs/heads/{}", name),
    ];
    for candidate in &candidates {
        // only HEAD and files under refs/ are refs; config.toml, objects/ etc. never match
        if !is_ref_location(candidate) || validate_ref_name(candidate).is_err() {
            continue;
        }
        if let Some(oid) = get_ref(repo, candidate)? {
            tracing::trace!(name, candidate = candidate.as_str(), %oid, "resolved ref");
            return Ok(oid);
        }
    }

    if is_oid_hex(name) {
        return Oid::from_hex(name);
    }

    Err(Error::UnknownReference(name.to_string()))
}

/// iterate HEAD, then every ref under `refs/`, as (name, oid)
///
/// refs without a value (an unborn HEAD) are skipped.
pub fn iter_all_refs(repo: &Repo) -> impl Iterator<Item = Result<(String, Oid)>> + '_ {
    let git_dir = repo.git_dir().to_path_buf();

    let scanned = WalkDir::new(repo.refs_path())
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(ref_name_of(&git_dir, entry.path())),
            Ok(_) => None,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                Some(Err(Error::Io {
                    path,
                    source: e.into(),
                }))
            }
        });

    std::iter::once(Ok(HEAD.to_string()))
        .chain(scanned)
        .filter_map(move |name| match name {
            Ok(name) => match get_ref(repo, &name) {
                Ok(Some(oid)) => Some(Ok((name, oid))),
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            },
            Err(e) => Some(Err(e)),
        })
}

fn is_ref_location(name: &str) -> bool {
    name == HEAD || name.starts_with("refs/")
}

/// get filesystem path for a ref
fn ref_path(repo: &Repo, name: &str) -> PathBuf {
    repo.git_dir().join(name)
}

/// ref name (slash separated) of a file below the metadata directory
fn ref_name_of(git_dir: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(git_dir)
        .map_err(|_| Error::InvalidRef(path.display().to_string()))?;

    let parts: Vec<String> = rel
        .components()
        .map(|c| match c {
            Component::Normal(part) => Ok(part.to_string_lossy().into_owned()),
            _ => Err(Error::InvalidRef(rel.display().to_string())),
        })
        .collect::<Result<_>>()?;
    Ok(parts.join("/"))
}

/// validate ref name
fn validate_ref_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidRef("empty ref name".to_string()));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(Error::InvalidRef(format!(
            "ref name cannot start or end with '/': {}",
            name
        )));
    }

    if name.contains("//") {
        return Err(Error::InvalidRef(format!(
            "ref name cannot contain '//': {}",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidRef(format!(
            "ref name cannot contain null byte: {}",
            name
        )));
    }

    // check for path traversal
    for component in name.split('/') {
        if component == "." || component == ".." {
            return Err(Error::InvalidRef(format!(
                "ref name cannot contain '.' or '..': {}",
                name
            )));
        }
    }

    Ok(())
}
