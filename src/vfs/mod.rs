mod entry;
mod local_fs;
mod tree;
mod umask;

pub use entry::{Entry, EntryType, ListedKeys};
pub use local_fs::LocalFS;
pub use umask::UmaskGuard;
