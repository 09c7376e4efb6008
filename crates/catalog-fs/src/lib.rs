//! Filesystem layer for the devcontainer catalog
//!
//! Provides normalized path handling, atomic writes, format-aware config
//! loading, and the overlay copy used to materialize catalog entries.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod permissions;
pub mod tree;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use permissions::{is_executable, set_executable};
pub use tree::copy_tree;
