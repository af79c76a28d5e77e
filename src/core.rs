use std::path::Path;
use std::time::SystemTime;

pub use crate::error::Result;

pub mod utils;

/// Common interface of key-addressed storage backends.
///
/// Keys are forward-slash separated strings relative to the backend root. The
/// empty key denotes the root itself.
pub trait Adapter {
    /// Returns root path related to the host file system.
    fn root(&self) -> &Path;

    /// Reads the entire content of `key`.
    fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Writes `content` to `key`, replacing whatever was there. Missing parent
    /// directories are created. Returns the number of bytes written.
    fn write(&self, key: &str, content: &[u8]) -> Result<usize>;

    /// Checks whether anything exists at `key`.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Checks whether `key` is an existing directory.
    fn is_directory(&self, key: &str) -> Result<bool>;

    /// Returns every key below the directory `key`, at any depth.
    fn keys(&self, key: &str) -> Result<Vec<String>>;

    fn mtime(&self, key: &str) -> Result<SystemTime>;

    fn size(&self, key: &str) -> Result<u64>;

    fn checksum(&self, key: &str) -> Result<String>;

    /// Moves `key` to `new_key`.
    fn rename(&self, key: &str, new_key: &str) -> Result<()>;

    /// Copies the file at `key` to `new_key`.
    fn copy(&self, key: &str, new_key: &str) -> Result<()>;

    /// Removes `key`; directories are removed with all their content.
    /// Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}
