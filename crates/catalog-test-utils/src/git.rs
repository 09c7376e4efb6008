//! Git repository fixtures at three realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs.
//! Every remote is a local bare repository reached over `file://`, so no
//! fixture touches the network.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `git` in `path`, panicking with its stderr on failure.
///
/// # Panics
/// Panics if git cannot be spawned or exits non-zero.
pub fn run_git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Initialises a real git repository using `git2` (no commit, no config).
///
/// Realism level: **REAL** — valid git object store, empty history.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialises `path` as a git work tree on `main` with committer identity
/// configured, without committing anything.
///
/// # Panics
/// Panics if any git operation fails.
pub fn init_worktree(path: &Path) {
    run_git(path, &["init", "--quiet"]);
    run_git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);
    run_git(path, &["config", "tag.gpgsign", "false"]);
}

/// Stage everything in the work tree and commit it.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(path: &Path, message: &str) {
    run_git(path, &["add", "--all"]);
    run_git(path, &["commit", "--quiet", "--allow-empty", "-m", message]);
}

/// Lightweight tag at `HEAD`.
pub fn tag(path: &Path, name: &str) {
    run_git(path, &["tag", name]);
}

/// Annotated tag at `HEAD`; remotes advertise it with a peeled `^{}` line.
pub fn annotated_tag(path: &Path, name: &str) {
    run_git(path, &["tag", "-a", name, "-m", name]);
}

/// Work tree with a single commit containing `README.md`.
///
/// Realism level: **REAL WITH HISTORY** — `main` branch, one commit.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    init_worktree(path);
    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));
    commit_all(path, "Initial commit");
}

/// Bare copy of `worktree` at `dest`, with all branches and tags.
///
/// Returns the `file://` URL of the bare repository.
///
/// # Panics
/// Panics if the clone fails.
pub fn bare_remote(worktree: &Path, dest: &Path) -> String {
    let parent = dest
        .parent()
        .unwrap_or_else(|| panic!("bare_remote: {} has no parent", dest.display()));
    fs::create_dir_all(parent)
        .unwrap_or_else(|e| panic!("bare_remote: failed to create {}: {e}", parent.display()));
    let source = worktree.to_string_lossy().into_owned();
    let target = dest.to_string_lossy().into_owned();
    run_git(parent, &["clone", "--quiet", "--bare", &source, &target]);
    file_url(dest)
}

/// `file://` URL for a local path.
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
