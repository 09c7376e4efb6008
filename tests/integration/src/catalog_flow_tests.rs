//! End-to-end catalog flows against local git remotes
//!
//! Each test publishes a catalog as a bare repository and drives it through
//! the git CLI fetcher: resolve -> clone -> discover -> install -> cleanup.

use assert_fs::prelude::*;
use catalog_core::{CatalogLayout, CatalogSession, Error, GitCliFetcher};
use catalog_test_utils::catalog::{TestCatalog, TestRemote};
use catalog_test_utils::git;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;

/// `1.0.0` ships only the default entry; `2.0.0` adds `python` and bumps
/// the shared postcreate script.
fn published_catalog() -> (TestCatalog, TestRemote) {
    let catalog = TestCatalog::valid();
    catalog.commit_and_tag("Release 1.0.0", &["1.0.0"]);

    let python = catalog.add_entry("languages/python", "python");
    fs::write(python.join("VERSION"), "2.0.0\n").unwrap();
    catalog.write_file("catalog/default/VERSION", "2.0.0\n");
    catalog.write_file(
        "common/devcontainer-assets/postcreate.sh",
        "#!/bin/bash\n# release 2\n",
    );
    catalog.write_file("common/root-project-assets/.editorconfig", "root = true\n");
    catalog.commit_and_tag("Release 2.0.0", &[]);
    git::annotated_tag(catalog.root(), "2.0.0");

    let remote = TestRemote::from_worktree(catalog.root());
    (catalog, remote)
}

fn session() -> CatalogSession<GitCliFetcher> {
    CatalogSession::new(GitCliFetcher::new())
}

#[test]
fn test_resolve_then_install_latest_release() {
    let (_catalog, remote) = published_catalog();
    let project = assert_fs::TempDir::new().unwrap();
    let session = session();

    let locator = session.resolve(remote.url(), "1.0.0").unwrap();
    assert_eq!(locator.reference(), Some("2.0.0"));

    let entry = session
        .install(
            &locator.to_string(),
            "python",
            project.child(".devcontainer").path(),
            project.path(),
        )
        .unwrap();

    assert_eq!(entry.name, "python");
    let target = project.child(".devcontainer");
    target.child("VERSION").assert("2.0.0\n");
    target
        .child("postcreate.sh")
        .assert(predicate::str::contains("release 2"));
    target
        .child("nix-family-os/tinyproxy-daemon.sh")
        .assert(predicate::path::is_file());
    project.child(".editorconfig").assert("root = true\n");

    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(target.child("catalog-entry.json").path()).unwrap())
            .unwrap();
    assert_eq!(
        metadata["catalog_url"],
        format!("{}@2.0.0", remote.url())
    );
}

#[test]
fn test_install_pinned_older_release() {
    let (_catalog, remote) = published_catalog();
    let project = assert_fs::TempDir::new().unwrap();
    let locator = format!("{}@1.0.0", remote.url());

    session()
        .install(&locator, "default", project.child(".devcontainer").path(), project.path())
        .unwrap();

    project.child(".devcontainer/VERSION").assert("1.0.0\n");
    let script = fs::read_to_string(project.child(".devcontainer/postcreate.sh").path()).unwrap();
    assert!(!script.contains("release 2"));
    project.child(".editorconfig").assert(predicate::path::missing());
}

#[test]
fn test_entry_missing_from_pinned_release() {
    let (_catalog, remote) = published_catalog();
    let project = assert_fs::TempDir::new().unwrap();
    let locator = format!("{}@1.0.0", remote.url());

    let err = session()
        .install(&locator, "python", project.child(".devcontainer").path(), project.path())
        .unwrap_err();

    assert!(matches!(err, Error::EntryNotFound { ref name } if name == "python"));
}

#[test]
fn test_list_entries_default_first() {
    let (_catalog, remote) = published_catalog();

    let entries = session().list_entries(remote.url(), true).unwrap();

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["default", "python"]);
}

#[test]
fn test_checkout_removed_on_close_and_on_drop() {
    let (_catalog, remote) = published_catalog();
    let session = session();

    let checkout = session.checkout(remote.url()).unwrap();
    let closed_root = checkout.root().to_path_buf();
    assert!(closed_root.join("catalog/default").is_dir());
    checkout.close().unwrap();
    assert!(!closed_root.exists());

    let checkout = session.checkout(remote.url()).unwrap();
    let dropped_root = checkout.root().to_path_buf();
    drop(checkout);
    assert!(!dropped_root.exists());
}

#[test]
fn test_reinstall_restores_shared_scripts() {
    let (_catalog, remote) = published_catalog();
    let project = assert_fs::TempDir::new().unwrap();
    let target = project.child(".devcontainer");
    let locator = format!("{}@2.0.0", remote.url());
    let session = session();

    session
        .install(&locator, "default", target.path(), project.path())
        .unwrap();
    let first_metadata = fs::read(target.child("catalog-entry.json").path()).unwrap();
    target.child("postcreate.sh").write_str("echo local hack\n").unwrap();

    session
        .install(&locator, "default", target.path(), project.path())
        .unwrap();

    target
        .child("postcreate.sh")
        .assert(predicate::str::contains("release 2"));
    let second_metadata = fs::read(target.child("catalog-entry.json").path()).unwrap();
    assert_eq!(first_metadata, second_metadata);
}

#[test]
fn test_unreachable_remote_is_fetch_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let url = git::file_url(&temp.path().join("missing.git"));

    let err = session().list_entries(&url, false).unwrap_err();

    assert!(matches!(err, Error::Git(catalog_git::Error::Fetch { .. })));
    assert!(err.to_string().contains("git ls-remote"));
}

#[test]
fn test_no_compatible_release() {
    let (_catalog, remote) = published_catalog();

    let err = session().resolve(remote.url(), "3.0.0").unwrap_err();

    assert!(matches!(
        err,
        Error::Git(catalog_git::Error::NoCompatibleTag { .. })
    ));
}

#[test]
fn test_layout_override_from_toml() {
    let catalog = TestCatalog::valid();
    fs::rename(catalog.root().join("catalog"), catalog.root().join("entries")).unwrap();
    let remote = catalog.publish(&["1.0.0"]);

    let config = assert_fs::TempDir::new().unwrap();
    config
        .child("layout.toml")
        .write_str("entries_dir = \"entries\"\n")
        .unwrap();
    let layout = CatalogLayout::load(config.child("layout.toml").path()).unwrap();

    let overridden = CatalogSession::with_layout(GitCliFetcher::new(), layout);
    let entries = overridden.list_entries(remote.url(), false).unwrap();
    assert_eq!(entries.len(), 1);

    let defaults = session().list_entries(remote.url(), false).unwrap();
    assert!(defaults.is_empty());
}
