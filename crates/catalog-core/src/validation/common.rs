//! Shared-asset checks: the common assets tree and the optional root
//! project assets.

use std::fs;
use std::path::Path;

use catalog_fs::{NormalizedPath, is_executable};

use super::{ValidationResult, Validator};

impl Validator {
    /// Check the common assets directory.
    ///
    /// Findings are relative to `common_assets`.
    pub fn validate_common_assets(&self, common_assets: &Path) -> ValidationResult {
        let mut result = ValidationResult::new();
        let layout = &self.layout;

        if !common_assets.is_dir() {
            result.push("common assets directory not found");
            return result;
        }

        for script in &layout.required_scripts {
            check_required_file(common_assets, script, true, &mut result);
        }

        for family in &layout.os_families {
            let family_dir = common_assets.join(family);
            if !family_dir.is_dir() {
                result.push(format!("missing required directory '{family}'"));
                continue;
            }
            for file in &layout.os_family_files {
                let executable = layout.os_family_executables.contains(file);
                check_required_file(common_assets, &format!("{family}/{file}"), executable, &mut result);
            }
        }

        tracing::debug!(path = %common_assets.display(), errors = result.len(), "Checked common assets");
        result
    }

    /// Check the optional root project assets tree.
    ///
    /// Absent is fine; when present it must be a directory whose JSON files
    /// all parse. Findings are relative to `root_assets`.
    pub fn validate_root_assets(&self, root_assets: &Path) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Ok(meta) = fs::metadata(root_assets) else {
            return result;
        };
        if !meta.is_dir() {
            result.push("expected a directory, found a file");
            return result;
        }

        check_json_files(root_assets, root_assets, &mut result);
        result
    }
}

fn check_required_file(dir: &Path, rel: &str, executable: bool, result: &mut ValidationResult) {
    let path = dir.join(rel);
    if !path.is_file() {
        result.push(format!("missing required file '{rel}'"));
        return;
    }
    if !executable {
        return;
    }
    match is_executable(&path) {
        Ok(true) => {}
        Ok(false) => result.push(format!("'{rel}' is not executable")),
        Err(e) => result.push(format!("cannot read permissions of '{rel}': {e}")),
    }
}

fn check_json_files(base: &Path, dir: &Path, result: &mut ValidationResult) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            result.push(format!("cannot read '{}': {e}", relative(base, dir)));
            return;
        }
    };

    let mut paths: Vec<_> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            check_json_files(base, &path, result);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|text| {
                    serde_json::from_str::<serde_json::Value>(&text).map_err(|e| e.to_string())
                });
            if let Err(e) = parsed {
                result.push(format!("'{}' is not valid JSON: {e}", relative(base, &path)));
            }
        }
    }
}

pub(super) fn relative(base: &Path, path: &Path) -> String {
    NormalizedPath::relative(path, base)
        .unwrap_or_else(|| NormalizedPath::new(path))
        .to_string()
}
