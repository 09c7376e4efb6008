//! Fetcher backed by libgit2 (`git2`), for hosts without a `git` binary.

use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{AutotagOption, Cred, CredentialType, Direction, FetchOptions, Remote, RemoteCallbacks, Repository};

use crate::fetcher::{Fetcher, remove_partial};
use crate::{Error, FetchOperation, Result};

/// Credential attempts before giving up; libgit2 retries the callback
/// indefinitely on rejected credentials.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Default)]
pub struct Git2Fetcher;

impl Git2Fetcher {
    pub fn new() -> Self {
        Self
    }
}

/// SSH agent for SSH remotes, the configured credential helper for HTTPS.
fn callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut attempts = 0;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(username.unwrap_or("git"));
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            let config = git2::Config::open_default()?;
            return Cred::credential_helper(&config, url, username);
        }
        Cred::default()
    });
    callbacks
}

fn shallow_fetch_options<'a>() -> FetchOptions<'a> {
    let mut options = FetchOptions::new();
    options.remote_callbacks(callbacks()).depth(1);
    options
}

/// Every ref name the remote advertises.
fn remote_refs(url: &str) -> std::result::Result<Vec<String>, git2::Error> {
    let mut remote = Remote::create_detached(url)?;
    let connection = remote.connect_auth(Direction::Fetch, Some(callbacks()), None)?;
    let refs = connection
        .list()?
        .iter()
        .map(|head| head.name().to_string())
        .collect();
    Ok(refs)
}

fn clone_default(url: &str, dest: &Path) -> std::result::Result<(), git2::Error> {
    RepoBuilder::new()
        .fetch_options(shallow_fetch_options())
        .clone(url, dest)?;
    Ok(())
}

/// Branches go through `RepoBuilder`; tags are fetched by exact refspec into
/// a fresh repository and checked out detached, since a depth-1 clone of the
/// default branch need not contain the tagged commit.
fn clone_at(url: &str, reference: &str, dest: &Path) -> std::result::Result<(), git2::Error> {
    let refs = remote_refs(url)?;
    let branch_ref = format!("refs/heads/{reference}");
    let tag_ref = format!("refs/tags/{reference}");

    if refs.contains(&branch_ref) {
        RepoBuilder::new()
            .fetch_options(shallow_fetch_options())
            .branch(reference)
            .clone(url, dest)?;
        return Ok(());
    }

    if refs.contains(&tag_ref) {
        let repo = Repository::init(dest)?;
        let mut remote = repo.remote("origin", url)?;
        let mut options = shallow_fetch_options();
        options.download_tags(AutotagOption::None);
        let refspec = format!("+{tag_ref}:{tag_ref}");
        remote.fetch(&[refspec.as_str()], Some(&mut options), None)?;

        let commit = repo.revparse_single(&tag_ref)?.peel_to_commit()?;
        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
        repo.set_head_detached(commit.id())?;
        return Ok(());
    }

    Err(git2::Error::from_str(&format!(
        "remote has no branch or tag named '{reference}'"
    )))
}

impl Fetcher for Git2Fetcher {
    fn clone_into(&self, url: &str, reference: Option<&str>, dest: &Path) -> Result<()> {
        let result = match reference {
            Some(reference) => clone_at(url, reference, dest),
            None => clone_default(url, dest),
        };

        result.map_err(|e| {
            remove_partial(dest);
            Error::fetch(FetchOperation::Clone, url, reference, e.message())
        })
    }

    fn list_tags(&self, url: &str) -> Result<Vec<String>> {
        let tags: Vec<String> = remote_refs(url)
            .map_err(|e| Error::fetch(FetchOperation::ListTags, url, None, e.message()))?
            .into_iter()
            .filter(|name| name.starts_with("refs/tags/"))
            .collect();
        tracing::debug!(url = %url, count = tags.len(), "Listed remote tags");
        Ok(tags)
    }
}
