//! Validation result type
//!
//! Accumulates human-readable findings across every check of a pass.

use std::fmt;

/// Ordered list of validation findings; empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// Create an empty (valid) result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a finding
    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Record a batch of findings in order
    pub fn extend<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.errors.extend(errors.into_iter().map(Into::into));
    }

    /// Append `other`'s findings, each prefixed with `"<prefix>: "`
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationResult) {
        self.errors.extend(
            other
                .errors
                .into_iter()
                .map(|error| format!("{prefix}: {error}")),
        );
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("Catalog is valid");
        }
        for error in &self.errors {
            writeln!(f, "  - {error}")?;
        }
        write!(f, "{} validation error(s)", self.errors.len())
    }
}
