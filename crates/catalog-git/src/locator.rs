//! Catalog locator parsing.
//!
//! A locator is `<clone-url>[@<ref>]`. The `@` separating the ref is also
//! the user separator of SSH remotes (`git@host:org/repo.git`), so the split
//! is decided by a few rules rather than a grammar:
//!
//! - When the locator contains `.git`, the URL ends at the last `.git`. A
//!   ref is only recognized if the rest is `@` followed by at least one
//!   character; otherwise the whole locator is the URL (a bare trailing `@`
//!   stays in the URL).
//! - Without `.git`, the last `@` splits off the ref, except when it is the
//!   only `@` and the text after it contains `:` (an SSH user prefix).
//! - An empty ref means no ref.

use std::str::FromStr;

use crate::{Error, Result};

/// A parsed catalog locator: where to clone from, and optionally what to pin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    url: String,
    reference: Option<String>,
}

impl Locator {
    pub fn new(url: impl Into<String>, reference: Option<String>) -> Self {
        Self {
            url: url.into(),
            reference: reference.filter(|r| !r.is_empty()),
        }
    }

    /// Split `input` into clone URL and optional ref.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidLocator {
                locator: input.to_string(),
                reason: "locator is empty".into(),
            });
        }

        let (url, reference) = split_locator(input);
        if url.is_empty() {
            return Err(Error::InvalidLocator {
                locator: input.to_string(),
                reason: "missing clone URL before '@'".into(),
            });
        }

        Ok(Self::new(url, reference.map(str::to_string)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Pin this locator to `reference`, replacing any existing ref.
    pub fn with_reference(self, reference: impl Into<String>) -> Self {
        Self::new(self.url, Some(reference.into()))
    }
}

fn split_locator(input: &str) -> (&str, Option<&str>) {
    if let Some(idx) = input.rfind(".git") {
        let end = idx + ".git".len();
        return match input[end..].strip_prefix('@') {
            Some(reference) if !reference.is_empty() => (&input[..end], Some(reference)),
            _ => (input, None),
        };
    }

    let Some(at) = input.rfind('@') else {
        return (input, None);
    };

    let after = &input[at + 1..];
    if input.matches('@').count() == 1 && after.contains(':') {
        return (input, None);
    }

    let reference = Some(after).filter(|r| !r.is_empty());
    (&input[..at], reference)
}

/// Function form of [`Locator::parse`] returning `(clone_url, ref)`.
pub fn parse_locator(input: &str) -> Result<(String, Option<String>)> {
    let locator = Locator::parse(input)?;
    Ok((locator.url, locator.reference))
}

impl FromStr for Locator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders `<url>` or `<url>@<ref>`; this is the value stamped into
/// installed entries as `catalog_url`.
impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reference {
            Some(reference) => write!(f, "{}@{}", self.url, reference),
            None => f.write_str(&self.url),
        }
    }
}
