//! Release tag resolution.
//!
//! Catalog releases are tagged `MAJOR.MINOR.PATCH` with no prefix or
//! pre-release suffix. Anything else on the remote is ignored.

use catalog_meta::patterns::is_exact_semver;
use semver::Version;

use crate::{Error, Fetcher, Locator, Result};

const TAG_PREFIX: &str = "refs/tags/";
const PEELED_SUFFIX: &str = "^{}";

/// Strip the `refs/tags/` prefix and the peeled-tag marker from a ref name.
pub fn parse_tag_ref(line: &str) -> &str {
    let name = line.trim();
    let name = name.strip_prefix(TAG_PREFIX).unwrap_or(name);
    name.strip_suffix(PEELED_SUFFIX).unwrap_or(name)
}

/// Parse `text` as an exact `MAJOR.MINOR.PATCH` release version.
///
/// Accepts exactly what the catalog's version pattern accepts, so a tag
/// is a release iff a VERSION file with the same text would validate.
/// Components too large for `u64` are rejected.
pub fn exact_version(text: &str) -> Option<Version> {
    if !is_exact_semver(text) {
        return None;
    }
    let mut parts = text.split('.').map(str::parse::<u64>);
    match (parts.next()?, parts.next()?, parts.next()?) {
        (Ok(major), Ok(minor), Ok(patch)) => Some(Version::new(major, minor, patch)),
        _ => None,
    }
}

/// Highest release tag in `refs` at or above `min_version`.
///
/// Versions compare numerically, so `2.10.0` beats `2.9.0`.
pub fn select_latest_tag<S: AsRef<str>>(refs: &[S], min_version: &Version) -> Option<String> {
    refs.iter()
        .map(|line| parse_tag_ref(line.as_ref()))
        .filter_map(|name| exact_version(name).map(|version| (version, name)))
        .filter(|(version, _)| version >= min_version)
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, name)| name.to_string())
}

/// Ask the remote for its tags and pick the newest release at or above
/// `min_version`.
pub fn resolve_latest_tag<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    min_version: &str,
) -> Result<String> {
    let minimum = exact_version(min_version).ok_or_else(|| Error::InvalidVersion {
        version: min_version.to_string(),
    })?;

    let refs = fetcher.list_tags(url)?;
    let tag = select_latest_tag(refs.as_slice(), &minimum).ok_or_else(|| Error::NoCompatibleTag {
        url: url.to_string(),
        min_version: min_version.to_string(),
    })?;

    tracing::info!(url = %url, min_version = %min_version, tag = %tag, "Resolved catalog release");
    Ok(tag)
}

/// Locator pinned to the newest compatible release of `url`.
pub fn resolve_locator<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    min_version: &str,
) -> Result<Locator> {
    let tag = resolve_latest_tag(fetcher, url, min_version)?;
    Ok(Locator::new(url, Some(tag)))
}
