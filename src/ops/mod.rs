//! high-level operations on twig repositories

mod cat_file;
mod checkout;
mod commit;
mod graph;
mod hash_object;
mod log;
mod snapshot;
mod tag;

pub use cat_file::{cat_file, format_tree};
pub use checkout::checkout;
pub use commit::commit;
pub use graph::graph;
pub use hash_object::hash_object;
pub use log::{log, LogEntry};
pub use snapshot::{capture_directory, materialize_tree, read_tree, write_tree};
pub use tag::create_tag;
