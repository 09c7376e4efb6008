//! Normalized path handling for cross-platform compatibility

use std::path::Path;

/// A path normalized to use forward slashes internally.
///
/// Catalog paths end up in user-facing messages (validation errors,
/// duplicate-entry reports), so they are rendered the same way on every
/// platform. I/O always goes through the native `Path`; this type is for
/// display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Express `path` relative to `base`.
    ///
    /// The prefix is stripped on the native paths before normalizing, so a
    /// base containing `\` still matches on Unix. Returns `None` when `path`
    /// does not live under `base`; a path equal to `base` yields `"."`.
    pub fn relative(path: &Path, base: &Path) -> Option<Self> {
        let relative = path.strip_prefix(base).ok()?;
        if relative.as_os_str().is_empty() {
            return Some(Self::new("."));
        }
        Some(Self::new(relative))
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}
