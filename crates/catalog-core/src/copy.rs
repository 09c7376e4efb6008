//! Merge/copy engine.
//!
//! Installs an entry by overlaying its files and the shared assets into a
//! target directory. Shared assets are copied second and win every
//! collision, so re-installing restores them after local edits.

use std::fs;
use std::path::Path;

use catalog_fs::{ConfigStore, copy_tree};
use catalog_meta::CatalogLayout;
use serde_json::Value;

use crate::{Error, Result};

/// Install the entry at `entry_path` into `target`.
///
/// The copied metadata gets a `catalog_url` field set to `catalog_url` and
/// is rewritten in a stable format, so repeated installs with the same
/// inputs produce byte-identical files. Placeholder files are removed from
/// the top of `target`.
pub fn copy_entry(
    entry_path: &Path,
    common_assets: &Path,
    target: &Path,
    catalog_url: &str,
    layout: &CatalogLayout,
) -> Result<()> {
    fs::create_dir_all(target).map_err(|e| catalog_fs::Error::io(target, e))?;

    let entry_files = copy_tree(entry_path, target)?;
    let common_files = copy_tree(common_assets, target)?;

    stamp_catalog_url(&target.join(&layout.metadata_file), catalog_url)?;
    remove_placeholders(target, layout)?;

    tracing::info!(
        entry = %entry_path.display(),
        target = %target.display(),
        catalog_url = %catalog_url,
        entry_files,
        common_files,
        "Installed catalog entry"
    );
    Ok(())
}

/// Copy the root project assets into `project_root`.
///
/// Absent `root_assets` is a no-op. Existing files in `project_root` that
/// the assets do not mention are left alone. Returns the number of files
/// written.
pub fn copy_root_assets(root_assets: &Path, project_root: &Path) -> Result<usize> {
    if !root_assets.exists() {
        tracing::debug!(path = %root_assets.display(), "No root project assets to copy");
        return Ok(0);
    }

    let copied = copy_tree(root_assets, project_root)?;
    tracing::info!(project_root = %project_root.display(), files = copied, "Copied root project assets");
    Ok(copied)
}

fn stamp_catalog_url(metadata_path: &Path, catalog_url: &str) -> Result<()> {
    let store = ConfigStore::new();

    if !metadata_path.is_file() {
        return Err(Error::InvalidMetadata {
            path: metadata_path.to_path_buf(),
            message: "metadata file missing after copy".to_string(),
        });
    }

    let mut metadata: Value = store.load(metadata_path).map_err(|e| Error::InvalidMetadata {
        path: metadata_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let Some(object) = metadata.as_object_mut() else {
        return Err(Error::InvalidMetadata {
            path: metadata_path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        });
    };
    object.insert("catalog_url".to_string(), Value::String(catalog_url.to_string()));

    store.save(metadata_path, &metadata)?;
    Ok(())
}

fn remove_placeholders(target: &Path, layout: &CatalogLayout) -> Result<()> {
    for name in &layout.placeholder_files {
        let path = target.join(name);
        let Ok(meta) = fs::symlink_metadata(&path) else {
            continue;
        };
        let removed = if meta.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| catalog_fs::Error::io(&path, e))?;
        tracing::debug!(path = %path.display(), "Removed placeholder");
    }
    Ok(())
}
