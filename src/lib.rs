//! A sandboxed local-filesystem adapter for Rust.
//! Exposes a flat, key-addressed namespace backed by a real directory tree and guarantees
//! that no operation reads, writes or removes anything outside the root directory.
//!
//! ### Overview
//!
//! `vfs-local` defines the `Adapter` trait and its `LocalFS` implementation, which maps
//! forward-slash separated keys onto paths below a fixed root.
//!
//! **Key ideas**:
//! - **Containment**: Every key is normalized and checked against the root, component by
//!   component, before any filesystem call. Escaping keys fail with `Error::Boundary`.
//! - **On-demand directories**: Writes create missing parents with mode `0777` under a
//!   the process umask, or a configured one applied through a scoped guard.
//! - **Recursive delete**: Subtrees are removed child by child, with one permission
//!   recovery attempt per failing child.
//! - **Pluggable checksums**: Any `Checksum` implementation (SHA-256 by default).

mod checksum;
mod config;
mod core;
mod error;
mod vfs;

pub use crate::checksum::{Checksum, Sha256Checksum};
pub use crate::config::{AdapterConfig, ENV_PREFIX};
pub use crate::core::{Adapter, Result, utils};
pub use crate::error::Error;
pub use crate::vfs::{Entry, EntryType, ListedKeys, LocalFS, UmaskGuard};
