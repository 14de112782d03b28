use std::path::PathBuf;

use crate::hash::{ObjectKind, Oid};

/// error type for twig operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a twig repository (or not initialized): {0}")]
    RepositoryNotInitialized(PathBuf),

    #[error("repository already exists at {0}")]
    RepositoryExists(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(Oid),

    #[error("object {oid} is a {actual}, expected {expected}")]
    ObjectTypeMismatch {
        oid: Oid,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    #[error("unknown reference: {0}")]
    UnknownReference(String),

    #[error("unsupported filesystem entry type: {0}")]
    UnsupportedEntryType(PathBuf),

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid ref name: {0}")]
    InvalidRef(String),

    #[error("ref not found: {0}")]
    RefNotFound(String),

    #[error("invalid tree entry name: {0}")]
    InvalidEntryName(String),

    #[error("duplicate tree entry name: {0}")]
    DuplicateEntryName(String),

    #[error("invalid object type: {0}")]
    InvalidObjectType(String),

    #[error("refusing to write through symlinked directory: {0}")]
    SymlinkInPath(PathBuf),

    #[error("invalid ignore pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// helper to wrap io errors with path context
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
