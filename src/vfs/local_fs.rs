//! This module provides a key-addressed adapter over a real directory on the host system.
//! Every key is translated into a host path below a fixed root; nothing outside that root
//! can be read, written or removed through the adapter.
//!
//! ### Key Features:
//! - **Isolated root**: All operations are confined to a designated root directory (self.root).
//! - **Path normalization**: Keys are normalized lexically (`.`, `..`, repeated and trailing
//!   slashes) before the containment check, on every call.
//! - **Stateless**: Nothing is cached; each operation resolves its key anew.
//! - **On-demand directories**: Writes create missing parent directories with a fixed mode.

use std::fmt;
use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, trace};

use super::umask::UmaskGuard;
use crate::checksum::{Checksum, Sha256Checksum};
use crate::config::AdapterConfig;
use crate::core::{Adapter, Result, utils};
use crate::error::Error;

/// Adapter exposing a flat key namespace backed by the directory tree under `root`.
///
/// ### Usage notes:
/// - Keys use forward slashes on every host. A leading slash is ignored, so `"/a"` and `"a"`
///   name the same entry. The empty key names the root itself.
/// - Symlinks are never followed by `keys`, `list_keys` or `delete`.
/// - There is no locking between operations; concurrent writers race at the OS level.
///
/// ### Example:
/// ```
/// use vfs_local::{Adapter, LocalFS};
///
/// let root = std::env::temp_dir().join("vfs_local_doc");
/// let fs = LocalFS::new(&root, true).unwrap();
///
/// fs.write("docs/note.txt", b"Hello").unwrap();
/// assert_eq!(fs.read("docs/note.txt").unwrap(), b"Hello");
/// assert!(fs.compute_path("../outside").is_err());
///
/// fs.delete("docs").unwrap();
/// ```
pub struct LocalFS {
    root: PathBuf, // host-related absolute normalized path
    umask: Option<u32>, // None keeps the process mask
    checksum: Box<dyn Checksum + Send + Sync>,
}

impl LocalFS {
    /// Creates a new adapter rooted at `root`.
    /// * `root` may be relative; it is made absolute against the current directory and
    ///   normalized.
    /// * If `root` does not exist it is created when `create` is true, otherwise
    ///   `Error::MissingDirectory` is returned.
    pub fn new<P: AsRef<Path>>(root: P, create: bool) -> Result<Self> {
        Self::open(root.as_ref(), create, None)
    }

    /// Creates an adapter from loaded configuration.
    pub fn from_config(config: &AdapterConfig) -> Result<Self> {
        Self::open(&config.root, config.create, config.umask)
    }

    fn open(root: &Path, create: bool, umask: Option<u32>) -> Result<Self> {
        if root.as_os_str().is_empty() {
            return Err(Error::InvalidRoot(root.to_path_buf()));
        }
        let absolute = std::path::absolute(root).map_err(|e| Error::io("resolve", root, e))?;

        let fs = Self {
            root: utils::normalize(absolute),
            umask,
            checksum: Box::new(Sha256Checksum),
        };
        fs.ensure_directory_at(&fs.root, create)?;

        debug!("local adapter rooted at {}", fs.root.display());
        Ok(fs)
    }

    /// Sets the permission mask used while creating directories. Without it the
    /// process mask applies.
    pub fn with_umask(mut self, umask: u32) -> Self {
        self.umask = Some(umask);
        self
    }

    /// Replaces the checksum collaborator (SHA-256 by default).
    pub fn with_checksum<C>(mut self, checksum: C) -> Self
    where
        C: Checksum + Send + Sync + 'static,
    {
        self.checksum = Box::new(checksum);
        self
    }

    pub fn umask(&self) -> Option<u32> {
        self.umask
    }

    /// Returns the host path for `key`.
    /// Fails with `Error::Boundary` if the normalized path leaves the root.
    pub fn compute_path(&self, key: &str) -> Result<PathBuf> {
        let path = utils::normalize(utils::join_key(&self.root, key));
        self.contain(path)
    }

    /// Returns the key for a host path below the root.
    /// Relative paths are resolved against the current directory. Names that are not
    /// valid UTF-8 fail with `Error::InvalidKey`.
    pub fn compute_key<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| Error::io("resolve", path, e))?;
        let path = self.contain(utils::normalize(absolute))?;
        let relative = path.strip_prefix(&self.root).map_err(|_| self.boundary(&path))?;
        utils::key_from_relative(relative).ok_or_else(|| Error::InvalidKey(path.clone()))
    }

    // Path::starts_with compares whole components, so `/data2` is not under `/data`.
    pub(crate) fn contain(&self, path: PathBuf) -> Result<PathBuf> {
        if path.starts_with(&self.root) {
            Ok(path)
        } else {
            Err(self.boundary(&path))
        }
    }

    fn boundary(&self, path: &Path) -> Error {
        Error::Boundary {
            root: self.root.clone(),
            path: path.to_path_buf(),
        }
    }

    /// Makes sure `key` is a directory, creating it (and its parents) when `create` is set.
    pub fn ensure_directory_exists(&self, key: &str, create: bool) -> Result<()> {
        let path = self.compute_path(key)?;
        self.ensure_directory_at(&path, create)
    }

    /// Creates the directory `key` with all missing parents.
    /// Fails with `Error::AlreadyExists` if it is already a directory.
    pub fn create_directory(&self, key: &str) -> Result<()> {
        let path = self.compute_path(key)?;
        self.create_directory_at(&path)
    }

    fn ensure_directory_at(&self, path: &Path, create: bool) -> Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        if !create {
            return Err(Error::MissingDirectory(path.to_path_buf()));
        }
        self.create_directory_at(path)
    }

    fn create_directory_at(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(Error::AlreadyExists(path.to_path_buf()));
        }

        let _guard = UmaskGuard::acquire(self.umask);
        make_dir_chain(path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() {
                Error::AlreadyExists(path.to_path_buf())
            } else {
                Error::io("create directory", path, e)
            }
        })?;

        debug!("created directory {}", path.display());
        Ok(())
    }

    /// Materializes the parent of a resolved target path.
    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if path == self.root {
            return Ok(());
        }
        match path.parent() {
            Some(parent) => self.ensure_directory_at(parent, true),
            None => Ok(()),
        }
    }
}

fn dir_builder(recursive: bool) -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
}

// Parents are created recursively; the target itself is not, so losing a race
// to another creator is reported instead of ignored.
fn make_dir_chain(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.is_dir() {
            dir_builder(true).create(parent)?;
        }
    }
    dir_builder(false).create(path)
}

impl fmt::Debug for LocalFS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFS")
            .field("root", &self.root)
            .field("umask", &self.umask.map(|mask| format!("{mask:#o}")))
            .finish_non_exhaustive()
    }
}

impl Adapter for LocalFS {
    fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Reads the entire content of a file into a byte vector.
    /// Missing files, directories and permission problems are reported as `Error::Io`.
    fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.compute_path(key)?;
        trace!("read {}", path.display());
        fs::read(&path).map_err(|e| Error::io("read", &path, e))
    }

    /// Creates or truncates the file and writes `content`.
    /// Parent directories are created if necessary.
    fn write(&self, key: &str, content: &[u8]) -> Result<usize> {
        let path = self.compute_path(key)?;
        self.ensure_parent(&path)?;
        trace!("write {} ({} bytes)", path.display(), content.len());
        fs::write(&path, content).map_err(|e| Error::io("write", &path, e))?;
        Ok(content.len())
    }

    /// I/O problems (including a missing parent) read as `false`;
    /// a key outside the root is still an error.
    fn exists(&self, key: &str) -> Result<bool> {
        let path = self.compute_path(key)?;
        Ok(path.exists())
    }

    fn is_directory(&self, key: &str) -> Result<bool> {
        let path = self.compute_path(key)?;
        Ok(path.is_dir())
    }

    fn keys(&self, key: &str) -> Result<Vec<String>> {
        let path = self.compute_path(key)?;
        trace!("keys {}", path.display());
        Ok(self.walk(&path)?.into_iter().map(|entry| entry.into_key()).collect())
    }

    fn mtime(&self, key: &str) -> Result<SystemTime> {
        let path = self.compute_path(key)?;
        fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|e| Error::io("stat", &path, e))
    }

    fn size(&self, key: &str) -> Result<u64> {
        let path = self.compute_path(key)?;
        fs::metadata(&path)
            .map(|meta| meta.len())
            .map_err(|e| Error::io("stat", &path, e))
    }

    fn checksum(&self, key: &str) -> Result<String> {
        let path = self.compute_path(key)?;
        let mut file = fs::File::open(&path).map_err(|e| Error::io("open", &path, e))?;
        self.checksum
            .checksum(&mut file)
            .map_err(|e| Error::io("checksum", &path, e))
    }

    /// Moves an entry. The parent directory of the target is created if needed.
    /// Cross-device moves are not emulated.
    fn rename(&self, key: &str, new_key: &str) -> Result<()> {
        let from = self.compute_path(key)?;
        let to = self.compute_path(new_key)?;
        self.ensure_parent(&to)?;
        trace!("rename {} -> {}", from.display(), to.display());
        fs::rename(&from, &to).map_err(|e| Error::io("rename", &from, e))
    }

    fn copy(&self, key: &str, new_key: &str) -> Result<()> {
        let from = self.compute_path(key)?;
        let to = self.compute_path(new_key)?;
        self.ensure_parent(&to)?;
        trace!("copy {} -> {}", from.display(), to.display());
        fs::copy(&from, &to).map_err(|e| Error::io("copy", &from, e))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        trace!("delete {:?}", key);
        self.remove(key)
    }
}
