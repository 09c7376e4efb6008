//! Fetcher tests against local bare remotes served over file://

use catalog_git::{
    Error, FetchOperation, Fetcher, Git2Fetcher, GitCliFetcher, resolve_latest_tag,
};
use catalog_test_utils::catalog::{TestCatalog, TestRemote};
use catalog_test_utils::git;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Catalog with `1.0.0` (lightweight) on the first commit and `2.0.0`
/// (annotated) on `main`'s head.
fn two_release_remote() -> (TestCatalog, TestRemote) {
    let catalog = TestCatalog::valid();
    catalog.commit_and_tag("First release", &["1.0.0"]);

    catalog.write_file("catalog/default/VERSION", "2.0.0\n");
    catalog.commit_and_tag("Second release", &[]);
    git::annotated_tag(catalog.root(), "2.0.0");
    git::tag(catalog.root(), "nightly");

    let remote = TestRemote::from_worktree(catalog.root());
    (catalog, remote)
}

fn cloned_version(dest: &std::path::Path) -> String {
    fs::read_to_string(dest.join("catalog/default/VERSION")).unwrap()
}

// ============================================================================
// GitCliFetcher
// ============================================================================

#[test]
fn test_cli_clone_default_branch() {
    let (_catalog, remote) = two_release_remote();
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("repo");

    Fetcher::clone_into(&GitCliFetcher::new(), remote.url(), None, &dest)
        .unwrap();

    assert_eq!(cloned_version(&dest), "2.0.0\n");
    assert!(dest.join("common/devcontainer-assets/postcreate.sh").is_file());
}

#[test]
fn test_cli_clone_at_tag() {
    let (_catalog, remote) = two_release_remote();
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("repo");

    Fetcher::clone_into(&GitCliFetcher::new(), remote.url(), Some("1.0.0"), &dest)
        .unwrap();

    assert_eq!(cloned_version(&dest), "1.0.0\n");
}

#[test]
fn test_cli_clone_at_branch() {
    let (_catalog, remote) = two_release_remote();
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("repo");

    Fetcher::clone_into(&GitCliFetcher::new(), remote.url(), Some("main"), &dest)
        .unwrap();

    assert_eq!(cloned_version(&dest), "2.0.0\n");
}

#[test]
fn test_cli_clone_unknown_ref_leaves_nothing_behind() {
    let (_catalog, remote) = two_release_remote();
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("repo");

    let err = Fetcher::clone_into(&GitCliFetcher::new(), remote.url(), Some("9.9.9"), &dest)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Fetch { operation: FetchOperation::Clone, ref reference, .. } if reference.as_deref() == Some("9.9.9")
    ));
    let message = err.to_string();
    assert!(message.contains(remote.url()));
    assert!(message.contains("git ls-remote"));
    assert!(!dest.exists());
}

#[test]
fn test_cli_clone_missing_remote_fails() {
    let temp = TempDir::new().unwrap();
    let url = git::file_url(&temp.path().join("absent.git"));

    let result = Fetcher::clone_into(&GitCliFetcher::new(), &url, None, &temp.path().join("repo"));

    assert!(matches!(result, Err(Error::Fetch { .. })));
}

#[test]
fn test_cli_list_tags_includes_peeled_refs() {
    let (_catalog, remote) = two_release_remote();

    let tags = GitCliFetcher::new().list_tags(remote.url()).unwrap();

    assert!(tags.contains(&"refs/tags/1.0.0".to_string()));
    assert!(tags.contains(&"refs/tags/2.0.0".to_string()));
    assert!(tags.contains(&"refs/tags/2.0.0^{}".to_string()));
    assert!(tags.contains(&"refs/tags/nightly".to_string()));
    assert!(tags.iter().all(|t| t.starts_with("refs/tags/")));
}

#[test]
fn test_cli_shallow_clone_is_removed_on_drop() {
    let (_catalog, remote) = two_release_remote();

    let clone = GitCliFetcher::new()
        .shallow_clone(remote.url(), Some("1.0.0"))
        .unwrap();
    let path = clone.path().to_path_buf();
    assert_eq!(cloned_version(&path), "1.0.0\n");

    drop(clone);
    assert!(!path.exists());
}

#[test]
fn test_resolve_latest_tag_over_cli() {
    let (_catalog, remote) = two_release_remote();

    let tag = resolve_latest_tag(&GitCliFetcher::new(), remote.url(), "1.0.0").unwrap();

    assert_eq!(tag, "2.0.0");
}

#[test]
fn test_resolve_latest_tag_above_all_releases() {
    let (_catalog, remote) = two_release_remote();

    let err = resolve_latest_tag(&GitCliFetcher::new(), remote.url(), "2.0.1").unwrap_err();

    assert!(matches!(err, Error::NoCompatibleTag { .. }));
}

// ============================================================================
// Git2Fetcher
// ============================================================================

#[test]
fn test_git2_list_tags() {
    let (_catalog, remote) = two_release_remote();

    let tags = Git2Fetcher::new().list_tags(remote.url()).unwrap();

    assert!(tags.contains(&"refs/tags/1.0.0".to_string()));
    assert!(tags.contains(&"refs/tags/2.0.0".to_string()));
    assert!(tags.iter().all(|t| t.starts_with("refs/tags/")));
}

#[test]
fn test_git2_and_cli_resolve_the_same_tag() {
    let (_catalog, remote) = two_release_remote();

    let via_cli = resolve_latest_tag(&GitCliFetcher::new(), remote.url(), "0.1.0").unwrap();
    let via_git2 = resolve_latest_tag(&Git2Fetcher::new(), remote.url(), "0.1.0").unwrap();

    assert_eq!(via_cli, via_git2);
}

// ============================================================================
// Repositories without releases
// ============================================================================

#[test]
fn test_untagged_remote_lists_no_tags() {
    let temp = TempDir::new().unwrap();
    let worktree = temp.path().join("work");
    fs::create_dir(&worktree).unwrap();
    git::real_git_repo_with_commit(&worktree);
    let url = git::bare_remote(&worktree, &temp.path().join("remote.git"));

    assert!(GitCliFetcher::new().list_tags(&url).unwrap().is_empty());
    assert!(Git2Fetcher::new().list_tags(&url).unwrap().is_empty());

    let err = resolve_latest_tag(&GitCliFetcher::new(), &url, "0.0.0").unwrap_err();
    assert!(matches!(err, Error::NoCompatibleTag { .. }));
}

#[test]
fn test_git2_lists_empty_repository() {
    let temp = TempDir::new().unwrap();
    git::real_git_repo(temp.path());

    let tags = Git2Fetcher::new()
        .list_tags(&git::file_url(temp.path()))
        .unwrap();

    assert!(tags.is_empty());
}
