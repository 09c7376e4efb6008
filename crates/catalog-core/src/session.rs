//! Scoped catalog sessions.
//!
//! A session ties a [`Fetcher`] to a [`CatalogLayout`] and runs whole
//! catalog operations: parse the locator, clone, work on the clone, and
//! remove the clone however the operation ends.

use std::path::{Path, PathBuf};

use catalog_git::{Fetcher, LocalClone, Locator};
use catalog_meta::{CatalogEntry, CatalogLayout};

use crate::copy::{copy_entry, copy_root_assets};
use crate::discovery::{EntryInfo, discover_entries};
use crate::validation::{ValidationResult, Validator};
use crate::{Error, Result};

/// A catalog repository cloned for the duration of one operation.
///
/// Dropping the checkout removes the clone.
#[derive(Debug)]
pub struct CatalogCheckout {
    locator: Locator,
    clone: LocalClone,
    layout: CatalogLayout,
}

impl CatalogCheckout {
    pub fn root(&self) -> &Path {
        self.clone.path()
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn common_assets(&self) -> PathBuf {
        self.layout.common_assets(self.root())
    }

    pub fn root_assets(&self) -> PathBuf {
        self.layout.root_assets(self.root())
    }

    pub fn entries(&self, skip_incomplete: bool) -> Result<Vec<EntryInfo>> {
        discover_entries(self.root(), &self.layout, skip_incomplete)
    }

    /// Remove the clone now, reporting cleanup failures.
    pub fn close(self) -> Result<()> {
        self.clone.close()?;
        Ok(())
    }
}

/// Runs catalog operations through one fetcher.
#[derive(Debug, Clone)]
pub struct CatalogSession<F: Fetcher> {
    fetcher: F,
    layout: CatalogLayout,
}

impl<F: Fetcher> CatalogSession<F> {
    /// Session using the default catalog layout
    pub fn new(fetcher: F) -> Self {
        Self::with_layout(fetcher, CatalogLayout::default())
    }

    pub fn with_layout(fetcher: F, layout: CatalogLayout) -> Self {
        Self { fetcher, layout }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    /// Clone the catalog named by `locator`.
    pub fn checkout(&self, locator: &str) -> Result<CatalogCheckout> {
        let locator = Locator::parse(locator)?;
        let clone = self
            .fetcher
            .shallow_clone(locator.url(), locator.reference())?;
        Ok(CatalogCheckout {
            locator,
            clone,
            layout: self.layout.clone(),
        })
    }

    /// Run `f` against a fresh checkout of `locator`.
    ///
    /// The clone is removed whether `f` succeeds, fails, or panics.
    pub fn with_checkout<T>(
        &self,
        locator: &str,
        f: impl FnOnce(&CatalogCheckout) -> Result<T>,
    ) -> Result<T> {
        let checkout = self.checkout(locator)?;
        let value = f(&checkout)?;
        checkout.close()?;
        Ok(value)
    }

    /// Entries offered by the catalog at `locator`, default entry first.
    pub fn list_entries(&self, locator: &str, skip_incomplete: bool) -> Result<Vec<CatalogEntry>> {
        self.with_checkout(locator, |checkout| {
            let entries = checkout.entries(skip_incomplete)?;
            Ok(entries.into_iter().map(|info| info.entry).collect())
        })
    }

    /// Validate the catalog at `locator`.
    pub fn validate(&self, locator: &str) -> Result<ValidationResult> {
        let validator = Validator::new(self.layout.clone());
        self.with_checkout(locator, |checkout| validator.validate_repository(checkout.root()))
    }

    /// Install the entry named `entry_name` into `target` and the root
    /// project assets into `project_root`.
    ///
    /// The installed metadata records the locator it came from.
    pub fn install(
        &self,
        locator: &str,
        entry_name: &str,
        target: &Path,
        project_root: &Path,
    ) -> Result<CatalogEntry> {
        self.with_checkout(locator, |checkout| {
            let info = checkout
                .entries(false)?
                .into_iter()
                .find(|info| info.name() == entry_name)
                .ok_or_else(|| Error::EntryNotFound {
                    name: entry_name.to_string(),
                })?;

            copy_entry(
                &info.path,
                &checkout.common_assets(),
                target,
                &checkout.locator().to_string(),
                &self.layout,
            )?;
            copy_root_assets(&checkout.root_assets(), project_root)?;

            Ok(info.entry)
        })
    }

    /// Locator pinned to the newest release of `url` at or above
    /// `min_version`.
    pub fn resolve(&self, url: &str, min_version: &str) -> Result<Locator> {
        Ok(catalog_git::resolve_locator(&self.fetcher, url, min_version)?)
    }
}
