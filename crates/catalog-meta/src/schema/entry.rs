//! Entry metadata schema - loaded from `<entry>/catalog-entry.json`
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "name": "python",
//!   "description": "Python 3 with uv and common tooling",
//!   "tags": ["python", "uv"],
//!   "maintainer": "platform-team",
//!   "min_cli_version": "1.4.0"
//! }
//! ```
//!
//! Loading applies the same field rules as
//! [`crate::validation::validate_metadata`], so a loaded `CatalogEntry`
//! always has a valid name, tags, description and `min_cli_version`.

use std::path::Path;

use catalog_fs::ConfigStore;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::validation::validate_loaded_metadata;
use crate::{CatalogLayout, Error, Result};

/// Fields a catalog author may declare.
pub const KNOWN_FIELDS: [&str; 5] = [
    "name",
    "description",
    "tags",
    "maintainer",
    "min_cli_version",
];

/// Declared identity of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cli_version: Option<String>,
    /// Stamped into installed copies by the copy engine; never authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_url: Option<String>,
}

/// `"tags": null` means no tags.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogEntry {
    /// Parse and check an entry from its metadata file.
    ///
    /// Every rule violation is listed in the `InvalidEntry` message. Installed
    /// copies with a stamped `catalog_url` load too.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |message: String| Error::InvalidEntry {
            path: path.to_path_buf(),
            message,
        };

        let value: Value = ConfigStore::new().load(path).map_err(|e| match e {
            catalog_fs::Error::ConfigParse { message, .. } => invalid(message),
            other => Error::Fs(other),
        })?;

        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let errors = validate_loaded_metadata(&value, &file);
        if !errors.is_empty() {
            return Err(invalid(errors.join("; ")));
        }

        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
    }

    /// Parse the metadata file inside an entry directory.
    pub fn load_from_dir(entry_dir: &Path, layout: &CatalogLayout) -> Result<Self> {
        Self::load(entry_dir.join(&layout.metadata_file))
    }

    pub fn is_default(&self, layout: &CatalogLayout) -> bool {
        self.name == layout.default_entry
    }
}
