//! Entry discovery.
//!
//! An entry is any directory under the entries subtree that directly holds
//! the metadata file, at any depth. Discovery is best-effort: entries whose
//! metadata fails to load or breaks a field rule are skipped with a warning,
//! as are subtrees that cannot be read. Reporting them is left to
//! validation.

use std::fs;
use std::path::{Path, PathBuf};

use catalog_meta::{CatalogEntry, CatalogLayout};
use walkdir::WalkDir;

use crate::{Error, Result};

/// A discovered entry: where it lives and what it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub path: PathBuf,
    pub entry: CatalogEntry,
}

impl EntryInfo {
    pub fn name(&self) -> &str {
        &self.entry.name
    }
}

/// Discover the entries of the catalog checked out at `root`.
///
/// With `skip_incomplete`, entries without a configuration file are left
/// out. The entry named by `layout.default_entry` comes first, the rest
/// follow by name.
pub fn discover_entries(
    root: &Path,
    layout: &CatalogLayout,
    skip_incomplete: bool,
) -> Result<Vec<EntryInfo>> {
    ensure_root(root)?;

    let scan = find_entry_dirs(&layout.entries(root), layout);
    for (path, error) in &scan.unreadable {
        tracing::warn!(path = %path.display(), error = %error, "Skipping unreadable directory");
    }

    let mut entries = Vec::new();
    for dir in scan.dirs {
        let entry = match CatalogEntry::load_from_dir(&dir, layout) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Skipping entry with unreadable metadata");
                continue;
            }
        };

        if skip_incomplete && !dir.join(&layout.config_file).is_file() {
            tracing::debug!(entry = %entry.name, path = %dir.display(), "Skipping incomplete entry");
            continue;
        }

        entries.push(EntryInfo { path: dir, entry });
    }

    sort_entries(&mut entries, layout);
    tracing::debug!(root = %root.display(), count = entries.len(), "Discovered catalog entries");
    Ok(entries)
}

/// Outcome of walking the entries subtree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryScan {
    /// Every directory holding the metadata file, whether or not the
    /// metadata parses, in walk order sorted per directory.
    pub dirs: Vec<PathBuf>,
    /// Directories that could not be read, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Walk `entries_root` for entry directories.
///
/// `.git` is skipped and symlinked directories are not followed. A missing
/// `entries_root` yields nothing; an unreadable subtree is recorded in
/// [`EntryScan::unreadable`] and the walk carries on.
pub fn find_entry_dirs(entries_root: &Path, layout: &CatalogLayout) -> EntryScan {
    let mut scan = EntryScan::default();
    if !entries_root.is_dir() {
        return scan;
    }

    let walker = WalkDir::new(entries_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == ".git"));

    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_dir() && entry.path().join(&layout.metadata_file).is_file() {
                    scan.dirs.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().unwrap_or(entries_root).to_path_buf();
                let reason = e
                    .io_error()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| e.to_string());
                scan.unreadable.push((path, reason));
            }
        }
    }
    scan
}

fn sort_entries(entries: &mut [EntryInfo], layout: &CatalogLayout) {
    entries.sort_by(|a, b| {
        let a_default = a.entry.is_default(layout);
        let b_default = b.entry.is_default(layout);
        b_default
            .cmp(&a_default)
            .then_with(|| a.entry.name.cmp(&b.entry.name))
            .then_with(|| a.path.cmp(&b.path))
    });
}

pub(crate) fn ensure_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::Environment {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        }),
        Err(e) => Err(Error::Environment {
            path: root.to_path_buf(),
            message: e.to_string(),
        }),
    }
}
