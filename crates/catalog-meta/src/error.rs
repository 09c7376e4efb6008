//! Error types for catalog-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] catalog_fs::Error),

    #[error("Invalid catalog entry at {path}: {message}")]
    InvalidEntry { path: PathBuf, message: String },

    #[error("Invalid catalog layout: {message}")]
    InvalidLayout { message: String },
}
