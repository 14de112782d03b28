//! twig - minimal git-like version control core
//!
//! a content-addressed object store with a commit graph and named refs on top.
//! a working directory is snapshotted into trees, trees are chained into commits,
//! and refs name commits (or any other object).
//!
//! # Core concepts
//!
//! - **Blob**: raw file content (or a symlink target)
//! - **Tree**: one directory level, entries sorted by name, each `mode SP name NUL digest`
//! - **Commit**: a tree, an optional parent and a message
//! - **Ref**: a file under `.twig/` holding an object id; `HEAD` is the current commit
//!
//! # Hash format
//!
//! oid = SHA1("<kind> <len>\0" | payload)
//!
//! objects are stored zstd-compressed at `.twig/objects/<2 hex>/<38 hex>`.
//!
//! # Example usage
//!
//! ```no_run
//! use twig::{ops, Repo};
//! use std::path::Path;
//!
//! // initialize a repository in a working directory
//! let repo = Repo::init(Path::new("/path/to/work")).unwrap();
//!
//! // snapshot the working tree on top of HEAD
//! let first = ops::commit(&repo, "initial commit").unwrap();
//! ops::create_tag(&repo, "v1", "@").unwrap();
//!
//! // restore it later
//! ops::checkout(&repo, "v1").unwrap();
//! assert_eq!(twig::resolve_name(&repo, "@").unwrap(), first);
//! ```

mod config;
mod error;
mod hash;
mod ignore;
mod object;
mod refs;
mod repo;

pub mod fs;
pub mod ops;
pub mod types;

pub use config::{Config, CoreConfig, IgnoreConfig};
pub use error::{Error, Result};
pub use hash::{compute_object_hash, is_oid_hex, ObjectKind, Oid};
pub use ignore::{Exclude, IgnoreRules};
pub use object::{
    blob_exists, create_commit, flatten_tree, object_exists, object_path, read_blob, read_commit,
    read_object, read_object_any, read_tree, walk_ancestors, write_blob, write_commit,
    write_object, write_tree, Ancestors, FlatEntry,
};
pub use refs::{
    delete_ref, get_ref, iter_all_refs, ref_exists, resolve_name, update_ref, HEAD,
};
pub use repo::{Repo, TWIG_DIR};
pub use types::{decode_tree, encode_tree, Commit, Mode, Tree, TreeEntry};
