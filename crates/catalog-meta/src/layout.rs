//! Catalog layout configuration.
//!
//! Every directory and file name the engine looks for lives here, in one
//! immutable table that discovery, validation, and copying receive by
//! reference. The defaults describe the published catalog layout:
//!
//! ```text
//! <repo>/
//!   common/
//!     devcontainer-assets/
//!       postcreate.sh  functions.sh  postcreate-wrapper.sh  project-setup.sh
//!       nix-family-os/  README.md  tinyproxy.conf.template  tinyproxy-daemon.sh
//!       wsl-family-os/  (same)
//!     root-project-assets/      (optional, copied into the project root)
//!   catalog/
//!     <any>/<depth>/<entry>/
//!       catalog-entry.json  devcontainer.json  VERSION
//! ```
//!
//! A partial override can be loaded from TOML or JSON; missing keys keep
//! their defaults.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use catalog_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogLayout {
    /// Shared assets copied over every entry, relative to the repository root
    pub common_assets_dir: String,
    /// Optional tree copied verbatim into the consumer's project root
    pub root_assets_dir: String,
    /// Subtree holding the entries
    pub entries_dir: String,
    /// File whose presence marks a directory as an entry
    pub metadata_file: String,
    pub config_file: String,
    pub version_file: String,
    /// Top-level common asset scripts; each must be executable
    pub required_scripts: Vec<String>,
    /// OS-family subdirectories of the common assets
    pub os_families: Vec<String>,
    /// Files every OS-family directory must contain
    pub os_family_files: Vec<String>,
    /// Subset of `os_family_files` that must be executable
    pub os_family_executables: Vec<String>,
    /// Substring the entry config's `postCreateCommand` must contain
    pub postcreate_reference: String,
    /// Files removed from a freshly copied entry
    pub placeholder_files: Vec<String>,
    /// Entry name sorted ahead of all others
    pub default_entry: String,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self {
            common_assets_dir: "common/devcontainer-assets".into(),
            root_assets_dir: "common/root-project-assets".into(),
            entries_dir: "catalog".into(),
            metadata_file: "catalog-entry.json".into(),
            config_file: "devcontainer.json".into(),
            version_file: "VERSION".into(),
            required_scripts: strings(&[
                "postcreate.sh",
                "functions.sh",
                "postcreate-wrapper.sh",
                "project-setup.sh",
            ]),
            os_families: strings(&["nix-family-os", "wsl-family-os"]),
            os_family_files: strings(&[
                "README.md",
                "tinyproxy.conf.template",
                "tinyproxy-daemon.sh",
            ]),
            os_family_executables: strings(&["tinyproxy-daemon.sh"]),
            postcreate_reference: ".devcontainer/postcreate-wrapper.sh".into(),
            placeholder_files: strings(&[".gitkeep", "devcontainer.env.example"]),
            default_entry: "default".into(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CatalogLayout {
    /// Load a layout override from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let layout: Self = ConfigStore::new().load(path.as_ref())?;
        layout.check()?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded catalog layout override");
        Ok(layout)
    }

    /// Reject layouts whose file names could never match anything.
    pub fn check(&self) -> Result<()> {
        let named = [
            ("common_assets_dir", &self.common_assets_dir),
            ("entries_dir", &self.entries_dir),
            ("metadata_file", &self.metadata_file),
            ("config_file", &self.config_file),
            ("version_file", &self.version_file),
        ];
        for (key, value) in named {
            if value.trim().is_empty() {
                return Err(Error::InvalidLayout {
                    message: format!("'{key}' must not be empty"),
                });
            }
        }
        for exe in &self.os_family_executables {
            if !self.os_family_files.contains(exe) {
                return Err(Error::InvalidLayout {
                    message: format!(
                        "executable '{exe}' is not listed in 'os_family_files'"
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn common_assets(&self, root: &Path) -> PathBuf {
        root.join(&self.common_assets_dir)
    }

    pub fn root_assets(&self, root: &Path) -> PathBuf {
        root.join(&self.root_assets_dir)
    }

    pub fn entries(&self, root: &Path) -> PathBuf {
        root.join(&self.entries_dir)
    }

    /// The three files every entry directory must hold, in report order.
    pub fn required_entry_files(&self) -> [&str; 3] {
        [
            self.metadata_file.as_str(),
            self.config_file.as_str(),
            self.version_file.as_str(),
        ]
    }

    /// Names an entry must not use at its top level: the required scripts
    /// and the OS-family directories.
    pub fn reserved_names(&self) -> BTreeSet<String> {
        self.required_scripts
            .iter()
            .chain(self.os_families.iter())
            .cloned()
            .collect()
    }
}
