use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("path is outside root '{}': {}", .root.display(), .path.display())]
    Boundary { root: PathBuf, path: PathBuf },

    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path has no valid key: {}", .0.display())]
    InvalidKey(PathBuf),

    #[error("invalid root path: {0:?}")]
    InvalidRoot(PathBuf),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn walk(path: &Path, err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| path.to_path_buf());
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self::Io {
            op: "walk",
            path,
            source,
        }
    }

    /// True for errors raised by the root containment check.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary { .. })
    }

    /// The underlying OS error, if any.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
