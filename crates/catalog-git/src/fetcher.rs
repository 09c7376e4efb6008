//! Repository fetcher port.
//!
//! Catalog operations only need two remote capabilities: a depth-1 clone
//! pinned to an optional ref, and a listing of remote tags. Keeping them
//! behind [`Fetcher`] lets the engine run against the `git` binary, libgit2,
//! or a test double without changing any caller.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::Result;

/// Remote access used by catalog operations.
pub trait Fetcher {
    /// Depth-1 clone of `url` into `dest`, checked out at `reference` when
    /// given (branch or tag).
    ///
    /// `dest` must not exist. On failure implementations remove whatever they
    /// left at `dest`.
    fn clone_into(&self, url: &str, reference: Option<&str>, dest: &Path) -> Result<()>;

    /// Full ref names of the remote's tags, e.g. `refs/tags/1.2.0` and the
    /// peeled `refs/tags/1.2.0^{}` of annotated tags.
    fn list_tags(&self, url: &str) -> Result<Vec<String>>;

    /// Clone into a fresh disposable directory.
    ///
    /// The returned [`LocalClone`] owns the directory and removes it when
    /// dropped, so every exit path of the caller cleans up.
    fn shallow_clone(&self, url: &str, reference: Option<&str>) -> Result<LocalClone> {
        let dir = tempfile::Builder::new()
            .prefix("catalog-clone-")
            .tempdir()
            .map_err(|e| catalog_fs::Error::io(std::env::temp_dir(), e))?;
        let path = dir.path().join("repo");

        self.clone_into(url, reference, &path)?;

        tracing::info!(url = %url, reference = ?reference, path = %path.display(), "Cloned catalog repository");
        Ok(LocalClone { dir, path })
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn clone_into(&self, url: &str, reference: Option<&str>, dest: &Path) -> Result<()> {
        (**self).clone_into(url, reference, dest)
    }

    fn list_tags(&self, url: &str) -> Result<Vec<String>> {
        (**self).list_tags(url)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn clone_into(&self, url: &str, reference: Option<&str>, dest: &Path) -> Result<()> {
        (**self).clone_into(url, reference, dest)
    }

    fn list_tags(&self, url: &str) -> Result<Vec<String>> {
        (**self).list_tags(url)
    }
}

/// A disposable local copy of a catalog repository.
///
/// Removed on drop. Values derived from it (paths, discovered entries)
/// are only meaningful while it is alive.
#[derive(Debug)]
pub struct LocalClone {
    dir: TempDir,
    path: PathBuf,
}

impl LocalClone {
    /// Root of the cloned working tree.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the clone now, reporting failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        let dir_path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| catalog_fs::Error::io(&dir_path, e))?;
        tracing::debug!(path = %dir_path.display(), "Removed local clone");
        Ok(())
    }
}

/// Best-effort removal of a partially written clone.
pub(crate) fn remove_partial(dest: &Path) {
    if dest.exists()
        && let Err(e) = std::fs::remove_dir_all(dest)
    {
        tracing::warn!(path = %dest.display(), error = %e, "Failed to remove partial clone");
    }
}
