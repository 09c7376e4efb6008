//! Patterns shared by entry names, tags, and version strings

use regex::Regex;
use std::sync::LazyLock;

/// Entry names and tags: lowercase letter first, then lowercase letters,
/// digits, or dashes, never ending in a dash, at least two characters.
pub static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*[a-z0-9]$").unwrap());

/// Exact `major.minor.patch` with ASCII digits only. No prefix, no
/// pre-release or build suffix.
pub static SEMVER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").unwrap());

pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(value)
}

pub fn is_exact_semver(value: &str) -> bool {
    SEMVER_PATTERN.is_match(value)
}
