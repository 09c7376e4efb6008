//! Metadata and layout configuration for the devcontainer catalog.
//!
//! This crate holds the typed `CatalogEntry` model parsed from each entry's
//! metadata file, the field-level rules that metadata must satisfy, and the
//! `CatalogLayout` table naming every directory and file the catalog
//! engine looks for.

pub mod error;
pub mod layout;
pub mod patterns;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use layout::CatalogLayout;
pub use schema::{CatalogEntry, KNOWN_FIELDS};
pub use validation::{declared_name, validate_metadata};
