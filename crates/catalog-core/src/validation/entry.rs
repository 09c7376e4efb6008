//! Per-entry checks: required files, metadata and VERSION content, name
//! conflicts with common assets, and the postCreateCommand hook.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use catalog_meta::patterns::is_exact_semver;
use catalog_meta::validate_metadata;
use serde_json::Value;

use super::{ValidationResult, Validator};

impl Validator {
    /// Check one entry directory that will be installed alongside the
    /// shared assets at `common_assets`.
    ///
    /// Findings are relative to `entry_path`. Conflicts are checked against
    /// the required common-asset names only.
    pub fn validate_entry(&self, entry_path: &Path, common_assets: &Path) -> ValidationResult {
        let mut result = ValidationResult::new();
        let layout = &self.layout;

        for file in layout.required_entry_files() {
            if !entry_path.join(file).is_file() {
                result.push(format!("missing required file '{file}'"));
            }
        }

        if let Some(metadata) = read_json(entry_path, &layout.metadata_file, &mut result) {
            result.extend(validate_metadata(&metadata, &layout.metadata_file));
        }

        self.check_version_file(entry_path, &mut result);
        self.check_conflicts(entry_path, &mut result);

        if let Some(config) = read_json(entry_path, &layout.config_file, &mut result) {
            self.check_postcreate(&config, &mut result);
        }

        tracing::debug!(
            path = %entry_path.display(),
            common_assets = %common_assets.display(),
            errors = result.len(),
            "Checked entry"
        );
        result
    }

    fn check_version_file(&self, entry_path: &Path, result: &mut ValidationResult) {
        let file = &self.layout.version_file;
        let path = entry_path.join(file);
        if !path.is_file() {
            return;
        }
        match fs::read_to_string(&path) {
            Ok(content) => {
                let version = content.trim();
                if version.is_empty() {
                    result.push(format!("{file}: file is empty"));
                } else if !is_exact_semver(version) {
                    result.push(format!(
                        "{file}: invalid version '{version}': expected MAJOR.MINOR.PATCH"
                    ));
                }
            }
            Err(e) => result.push(format!("{file}: cannot read: {e}")),
        }
    }

    /// Entry-local top-level names may not shadow a required common asset.
    fn check_conflicts(&self, entry_path: &Path, result: &mut ValidationResult) {
        let reserved = self.layout.reserved_names();

        for name in top_level_names(entry_path) {
            if reserved.contains(&name) {
                result.push(format!("'{name}' conflicts with a common asset of the same name"));
            }
        }
    }

    fn check_postcreate(&self, config: &Value, result: &mut ValidationResult) {
        let file = &self.layout.config_file;
        let reference = &self.layout.postcreate_reference;

        let command = match config.get("postCreateCommand") {
            None => {
                result.push(format!("{file}: missing 'postCreateCommand'"));
                return;
            }
            Some(Value::String(command)) => command.clone(),
            Some(Value::Array(parts)) => match parts
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
            {
                Some(parts) => parts.join(" "),
                None => {
                    result.push(format!(
                        "{file}: 'postCreateCommand' must be a string or a list of strings"
                    ));
                    return;
                }
            },
            Some(_) => {
                result.push(format!(
                    "{file}: 'postCreateCommand' must be a string or a list of strings"
                ));
                return;
            }
        };

        if !command.contains(reference.as_str()) {
            result.push(format!(
                "{file}: 'postCreateCommand' must run '{reference}'"
            ));
        }
    }
}

/// Parse `dir/file` as JSON. Absence is not reported here; the structural
/// check already did.
fn read_json(dir: &Path, file: &str, result: &mut ValidationResult) -> Option<Value> {
    let path = dir.join(file);
    if !path.is_file() {
        return None;
    }
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            result.push(format!("{file}: cannot read: {e}"));
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            result.push(format!("{file}: invalid JSON: {e}"));
            None
        }
    }
}

fn top_level_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}
