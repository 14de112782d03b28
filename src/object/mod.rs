mod blob;
mod commit;
mod store;
mod tree;

pub use blob::{blob_exists, read_blob, write_blob};
pub use commit::{create_commit, read_commit, walk_ancestors, write_commit, Ancestors};
pub use store::{object_exists, object_path, read_object, read_object_any, write_object};
pub use tree::{flatten_tree, read_tree, write_tree, FlatEntry};
