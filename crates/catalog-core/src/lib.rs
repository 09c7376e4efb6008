//! Core engine for the devcontainer catalog
//!
//! Discovers the entries of a checked-out catalog, validates the whole
//! repository in one pass, and installs an entry by overlaying it with the
//! catalog's shared assets. [`CatalogSession`] wraps these in the
//! clone-operate-remove cycle against a remote catalog.

pub mod copy;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod session;
pub mod validation;

pub use catalog_git::{Fetcher, Git2Fetcher, GitCliFetcher, Locator, parse_locator};
pub use catalog_meta::{CatalogEntry, CatalogLayout};
pub use copy::{copy_entry, copy_root_assets};
pub use discovery::{EntryInfo, EntryScan, discover_entries, find_entry_dirs};
pub use error::{Error, Result};
pub use session::{CatalogCheckout, CatalogSession};
pub use validation::{ValidationResult, Validator, validate_entry, validate_repository};
