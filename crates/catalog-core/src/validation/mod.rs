//! Catalog validation.
//!
//! Every check appends to a [`ValidationResult`] and keeps going, so one
//! pass reports every problem in the catalog. Only an unreadable repository
//! root is an [`Error`](crate::Error).
//!
//! Entry-scoped findings are relative to the entry directory; at the
//! repository level they are prefixed with the entry's path relative to
//! the root, e.g. `catalog/python: missing required file 'VERSION'`.

mod common;
mod entry;
mod repository;
mod result;

use std::path::Path;

use catalog_meta::CatalogLayout;

pub use result::ValidationResult;

use crate::Result;

/// Runs catalog checks against one [`CatalogLayout`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    layout: CatalogLayout,
}

impl Validator {
    pub fn new(layout: CatalogLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }
}

/// Validate the catalog at `root` with the default layout.
pub fn validate_repository(root: &Path) -> Result<ValidationResult> {
    Validator::default().validate_repository(root)
}

/// Validate one entry with the default layout.
pub fn validate_entry(entry_path: &Path, common_assets: &Path) -> ValidationResult {
    Validator::default().validate_entry(entry_path, common_assets)
}
