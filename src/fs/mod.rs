pub mod read;
pub mod write;

pub use read::{read_symlink_target, FileMetadata, FileType};
pub use write::{check_no_symlink_parents, create_symlink, write_file};
