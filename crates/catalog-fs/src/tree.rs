//! Recursive overlay copy.
//!
//! `copy_tree` merges a source tree into a destination: files with the same
//! relative path are overwritten, directories are merged, and anything in the
//! destination that the source does not mention is left alone. Copying the
//! entry first and the shared assets second is what gives shared assets
//! precedence.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Copy every file and directory under `src` into `dst`.
///
/// `dst` is created when absent. When a destination path has the wrong kind
/// (a file where the source has a directory, or the reverse) it is replaced.
/// Returns the number of files written.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    let mut copied = 0;
    let entries = fs::read_dir(src).map_err(|e| Error::io(src, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        // Follows symlinks so linked files are materialized as real files
        let source_is_dir = from.is_dir();
        let existing = fs::symlink_metadata(&to).ok();

        if source_is_dir {
            if let Some(meta) = existing.filter(|m| !m.is_dir()) {
                tracing::debug!(path = %to.display(), symlink = meta.file_type().is_symlink(), "Replacing non-directory with directory");
                fs::remove_file(&to).map_err(|e| Error::io(&to, e))?;
            }
            copied += copy_tree(&from, &to)?;
        } else {
            match existing {
                Some(meta) if meta.is_dir() => {
                    fs::remove_dir_all(&to).map_err(|e| Error::io(&to, e))?;
                }
                Some(meta) if meta.file_type().is_symlink() => {
                    fs::remove_file(&to).map_err(|e| Error::io(&to, e))?;
                }
                _ => {}
            }
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
            tracing::debug!(from = %from.display(), to = %to.display(), "Copied file");
            copied += 1;
        }
    }

    Ok(copied)
}
