//! [`TestCatalog`] builder for catalog repository test scenarios.
//!
//! Writes the default catalog layout: shared assets under
//! `common/devcontainer-assets`, entries under `catalog/`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

use crate::git;

pub const COMMON_ASSETS: &str = "common/devcontainer-assets";
pub const ROOT_ASSETS: &str = "common/root-project-assets";
pub const ENTRIES: &str = "catalog";
pub const METADATA_FILE: &str = "catalog-entry.json";
pub const CONFIG_FILE: &str = "devcontainer.json";
pub const VERSION_FILE: &str = "VERSION";

pub const COMMON_SCRIPTS: [&str; 4] = [
    "postcreate.sh",
    "functions.sh",
    "postcreate-wrapper.sh",
    "project-setup.sh",
];
pub const OS_FAMILIES: [&str; 2] = ["nix-family-os", "wsl-family-os"];
pub const OS_FAMILY_FILES: [&str; 3] = ["README.md", "tinyproxy.conf.template", "tinyproxy-daemon.sh"];

/// A temporary catalog repository on disk.
///
/// # Example
///
/// ```rust,no_run
/// use catalog_test_utils::catalog::TestCatalog;
///
/// let catalog = TestCatalog::valid();
/// catalog.add_entry("python/web", "python-web");
/// let remote = catalog.publish(&["1.0.0"]);
/// ```
pub struct TestCatalog {
    temp_dir: TempDir,
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCatalog {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A catalog that passes validation: complete common assets and one
    /// entry named `default`.
    pub fn valid() -> Self {
        let catalog = Self::new();
        catalog.write_common_assets();
        catalog.add_entry("default", "default");
        catalog
    }

    /// Return the root path of the catalog.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn common_assets(&self) -> PathBuf {
        self.root().join(COMMON_ASSETS)
    }

    pub fn entries(&self) -> PathBuf {
        self.root().join(ENTRIES)
    }

    /// Write every required shared asset with its executable bits set.
    pub fn write_common_assets(&self) {
        for script in COMMON_SCRIPTS {
            let rel = format!("{COMMON_ASSETS}/{script}");
            self.write_file(&rel, &format!("#!/bin/bash\n# {script}\n"));
            self.set_executable(&rel, true);
        }
        for family in OS_FAMILIES {
            for file in OS_FAMILY_FILES {
                self.write_file(
                    &format!("{COMMON_ASSETS}/{family}/{file}"),
                    &format!("{family} {file}\n"),
                );
            }
            self.set_executable(&format!("{COMMON_ASSETS}/{family}/tinyproxy-daemon.sh"), true);
        }
    }

    /// Write a valid entry named `name` at `catalog/<rel>` and return its path.
    pub fn add_entry(&self, rel: &str, name: &str) -> PathBuf {
        let dir = format!("{ENTRIES}/{rel}");
        self.write_json(
            &format!("{dir}/{METADATA_FILE}"),
            &json!({
                "name": name,
                "description": format!("The {name} environment"),
                "tags": ["test"],
            }),
        );
        self.write_json(
            &format!("{dir}/{CONFIG_FILE}"),
            &json!({
                "name": name,
                "postCreateCommand": "bash .devcontainer/postcreate-wrapper.sh",
            }),
        );
        self.write_file(&format!("{dir}/{VERSION_FILE}"), "1.0.0\n");
        self.root().join(dir)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", path.display()));
    }

    /// Write `value` as pretty JSON to `rel`.
    pub fn write_json(&self, rel: &str, value: &serde_json::Value) {
        let mut content = serde_json::to_string_pretty(value).unwrap();
        content.push('\n');
        self.write_file(rel, &content);
    }

    /// Add or clear the executable bits of `rel`. No-op off unix.
    pub fn set_executable(&self, rel: &str, executable: bool) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let path = self.root().join(rel);
            let mut perms = fs::metadata(&path).unwrap().permissions();
            let mode = if executable {
                perms.mode() | 0o111
            } else {
                perms.mode() & !0o111
            };
            perms.set_mode(mode);
            fs::set_permissions(&path, perms).unwrap();
        }
        #[cfg(not(unix))]
        let _ = (rel, executable);
    }

    /// Remove the file or directory at `rel`.
    pub fn remove(&self, rel: &str) {
        let path = self.root().join(rel);
        if path.is_dir() {
            fs::remove_dir_all(&path).unwrap();
        } else {
            fs::remove_file(&path).unwrap();
        }
    }

    /// Commit the catalog as-is and tag the commit with each of `tags`.
    ///
    /// Initialises git on first use, so it may be called repeatedly to build
    /// a history with different content per tag.
    pub fn commit_and_tag(&self, message: &str, tags: &[&str]) {
        if !self.root().join(".git").exists() {
            git::init_worktree(self.root());
        }
        git::commit_all(self.root(), message);
        for tag in tags {
            git::tag(self.root(), tag);
        }
    }

    /// Commit, tag, and expose the catalog as a bare `file://` remote.
    pub fn publish(&self, tags: &[&str]) -> TestRemote {
        self.commit_and_tag("Publish catalog", tags);
        TestRemote::from_worktree(self.root())
    }
}

/// A bare repository served over `file://`.
pub struct TestRemote {
    _dir: TempDir,
    url: String,
}

impl TestRemote {
    /// Bare copy of an existing work tree.
    pub fn from_worktree(worktree: &Path) -> Self {
        let dir = TempDir::new().unwrap();
        let url = git::bare_remote(worktree, &dir.path().join("catalog.git"));
        Self { _dir: dir, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
