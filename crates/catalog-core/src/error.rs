//! Error types for catalog-core

use std::path::PathBuf;

/// Result type for catalog-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in catalog-core operations
///
/// Validation findings are not errors; they are collected in a
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Local filesystem state prevents the operation, e.g. an unreadable root
    #[error("Cannot read catalog at {path}: {message}")]
    Environment { path: PathBuf, message: String },

    /// No discovered entry has the requested name
    #[error("Catalog entry not found: {name}")]
    EntryNotFound { name: String },

    /// Copied metadata could not be rewritten
    #[error("Invalid entry metadata at {path}: {message}")]
    InvalidMetadata { path: PathBuf, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from catalog-fs
    #[error(transparent)]
    Fs(#[from] catalog_fs::Error),

    /// Locator, fetch, or tag error from catalog-git
    #[error(transparent)]
    Git(#[from] catalog_git::Error),

    /// Metadata or layout error from catalog-meta
    #[error(transparent)]
    Meta(#[from] catalog_meta::Error),
}
