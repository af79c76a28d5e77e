//! Recursive listing and removal below the adapter root.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use super::entry::{Entry, EntryType, ListedKeys};
use super::local_fs::LocalFS;
use crate::core::Result;
use crate::error::Error;

impl LocalFS {
    /// Returns keys under the root that start with `prefix`, split into files and
    /// directories. `prefix` is matched as a plain string against each key.
    pub fn list_keys(&self, prefix: &str) -> Result<ListedKeys> {
        let root = self.compute_path("")?;
        let mut listed = ListedKeys::default();
        for entry in self.walk(&root)? {
            if !entry.key().starts_with(prefix) {
                continue;
            }
            if entry.is_dir() {
                listed.dirs.push(entry.into_key());
            } else if entry.is_file() {
                listed.keys.push(entry.into_key());
            }
        }
        Ok(listed)
    }

    /// Collects every entry below `dir`, depth first, sorted by file name.
    /// A missing `dir` or a non-directory yields nothing. Symlinks are listed but
    /// not followed.
    pub(crate) fn walk(&self, dir: &Path) -> Result<Vec<Entry>> {
        match fs::symlink_metadata(dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(Vec::new()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io("stat", dir, e)),
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(false)
            .follow_root_links(false)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| Error::walk(dir, e))?;
            let key = self.compute_key(entry.path())?;
            let entry_type = if entry.file_type().is_dir() {
                EntryType::Directory
            } else {
                EntryType::File
            };
            entries.push(Entry::new(key, entry_type));
        }
        Ok(entries)
    }

    /// Removes `key` and everything below it. A missing key is not an error.
    pub(crate) fn remove(&self, key: &str) -> Result<()> {
        let path = self.compute_path(key)?;
        self.remove_path(&path)
    }

    // Children are addressed by their host path, not by key, so entries whose
    // names are not valid keys are still removed.
    fn remove_path(&self, path: &Path) -> Result<()> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::io("stat", path, e)),
        };

        if !meta.is_dir() {
            return unlink(path).map_err(|e| Error::io("remove file", path, e));
        }

        let mut children = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| Error::io("read directory", path, e))? {
            let entry = entry.map_err(|e| Error::io("read directory", path, e))?;
            children.push(self.contain(entry.path())?);
        }
        children.sort();

        for child in &children {
            self.remove_child(child)?;
        }

        fs::remove_dir(path).map_err(|e| Error::io("remove directory", path, e))
    }

    // One retry after opening up the child's permissions; the second failure is final.
    fn remove_child(&self, path: &Path) -> Result<()> {
        let err = match self.remove_path(path) {
            Ok(()) => return Ok(()),
            Err(err @ Error::Io { .. }) => err,
            Err(err) => return Err(err),
        };

        warn!(
            "failed to remove {}: {}; retrying with open permissions",
            path.display(),
            err
        );
        if let Err(chmod_err) = force_open_permissions(path) {
            debug!("chmod {} failed: {}", path.display(), chmod_err);
            return Err(err);
        }
        self.remove_path(path)
    }
}

fn force_open_permissions(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    // chmod would act on the link target
    if meta.file_type().is_symlink() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o777))
    }

    #[cfg(not(unix))]
    {
        let mut permissions = meta.permissions();
        permissions.set_readonly(false);
        fs::set_permissions(path, permissions)
    }
}

fn unlink(path: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            // directory symlinks and junctions need remove_dir
            Err(remove_file_err) => match fs::remove_dir(path) {
                Ok(()) => Ok(()),
                Err(_) => Err(remove_file_err),
            },
        }
    }

    #[cfg(not(windows))]
    {
        fs::remove_file(path)
    }
}
