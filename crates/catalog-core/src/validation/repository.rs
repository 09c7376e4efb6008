//! Whole-repository validation and cross-entry checks.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use catalog_meta::declared_name;
use serde_json::Value;

use super::common::relative;
use super::{ValidationResult, Validator};
use crate::Result;
use crate::discovery::{ensure_root, find_entry_dirs};

impl Validator {
    /// Validate the catalog checked out at `root`.
    ///
    /// Every check runs; the only `Err` is an unreadable `root`.
    pub fn validate_repository(&self, root: &Path) -> Result<ValidationResult> {
        ensure_root(root)?;
        let layout = &self.layout;
        let mut result = ValidationResult::new();

        let common_assets = layout.common_assets(root);
        result.merge_prefixed(
            &layout.common_assets_dir,
            self.validate_common_assets(&common_assets),
        );
        result.merge_prefixed(
            &layout.root_assets_dir,
            self.validate_root_assets(&layout.root_assets(root)),
        );

        let entries_root = layout.entries(root);
        if !entries_root.is_dir() {
            result.push(format!(
                "entries directory '{}' not found",
                layout.entries_dir
            ));
        }

        let scan = find_entry_dirs(&entries_root, layout);
        for (path, reason) in &scan.unreadable {
            result.push(format!("cannot read '{}': {reason}", relative(root, path)));
        }

        let entry_dirs = scan.dirs;
        if entry_dirs.is_empty() {
            result.push(format!("no catalog entries found under '{}'", layout.entries_dir));
        }

        for dir in &entry_dirs {
            let rel = relative(root, dir);
            result.merge_prefixed(&rel, self.validate_entry(dir, &common_assets));
        }

        self.check_duplicate_names(root, &entry_dirs, &mut result);

        tracing::info!(
            root = %root.display(),
            entries = entry_dirs.len(),
            errors = result.len(),
            "Validated catalog repository"
        );
        Ok(result)
    }

    /// One error per later duplicate, naming both locations.
    fn check_duplicate_names(&self, root: &Path, entry_dirs: &[PathBuf], result: &mut ValidationResult) {
        let mut seen: BTreeMap<String, String> = BTreeMap::new();

        for dir in entry_dirs {
            let Some(metadata) = fs::read_to_string(dir.join(&self.layout.metadata_file))
                .ok()
                .and_then(|text| serde_json::from_str::<Value>(&text).ok())
            else {
                continue;
            };
            let Some(name) = declared_name(&metadata) else {
                continue;
            };

            let rel = relative(root, dir);
            match seen.get(name) {
                Some(first) => result.push(format!(
                    "duplicate entry name '{name}' in '{rel}' (already declared in '{first}')"
                )),
                None => {
                    seen.insert(name.to_string(), rel);
                }
            }
        }
    }
}
