//! Error types for catalog-git

/// Result type for catalog-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Remote operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOperation {
    Clone,
    ListTags,
}

impl std::fmt::Display for FetchOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clone => f.write_str("clone"),
            Self::ListTags => f.write_str("list tags of"),
        }
    }
}

/// Errors that can occur in catalog-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid catalog locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("{}", fetch_message(.operation, .url, .reference, .diagnostic))]
    Fetch {
        operation: FetchOperation,
        url: String,
        reference: Option<String>,
        diagnostic: String,
    },

    #[error("No tag of {url} is a release at or above {min_version}")]
    NoCompatibleTag { url: String, min_version: String },

    #[error("Invalid version '{version}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion { version: String },

    #[error(transparent)]
    Fs(#[from] catalog_fs::Error),
}

impl Error {
    pub(crate) fn fetch(
        operation: FetchOperation,
        url: &str,
        reference: Option<&str>,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self::Fetch {
            operation,
            url: url.to_string(),
            reference: reference.map(str::to_string),
            diagnostic: diagnostic.into(),
        }
    }
}

fn fetch_message(
    operation: &FetchOperation,
    url: &str,
    reference: &Option<String>,
    diagnostic: &str,
) -> String {
    let mut message = format!("Failed to {operation} catalog repository {url}");
    if let Some(reference) = reference {
        message.push_str(&format!(" at ref '{reference}'"));
    }
    message.push_str(
        "\n  - HTTPS remotes: check the URL and that your credential helper or token grants read access",
    );
    message.push_str(
        "\n  - SSH remotes: check that your key is loaded (ssh-add -l) and authorized on the host",
    );
    message.push_str(&format!("\n  Verify access with: git ls-remote {url}"));
    let diagnostic = diagnostic.trim();
    if !diagnostic.is_empty() {
        message.push_str(&format!("\n  git reported: {diagnostic}"));
    }
    message
}
