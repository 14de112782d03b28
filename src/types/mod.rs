mod commit;
mod tree;

pub use commit::Commit;
pub use tree::{decode_tree, encode_tree, Mode, Tree, TreeEntry, TreeIter};
