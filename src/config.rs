//! Adapter configuration.
//!
//! Values come from an optional config file (any format the `config` crate
//! recognises by extension) with `VFS_LOCAL_*` environment overrides, e.g.
//! `VFS_LOCAL_ROOT=/srv/data`. Environment values for `umask` are decimal.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const ENV_PREFIX: &str = "VFS_LOCAL";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AdapterConfig {
    /// Root directory of the key namespace.
    pub root: PathBuf,

    /// Create the root directory when it is missing.
    #[serde(default)]
    pub create: bool,

    /// Permission mask applied while directories are created. Unset means the
    /// process mask is left alone.
    #[serde(default)]
    pub umask: Option<u32>,
}

impl AdapterConfig {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            create: false,
            umask: None,
        }
    }

    /// Loads configuration from `path` (optional) with environment overrides.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path.as_ref()));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
