//! Typed schemas for catalog files

pub mod entry;

pub use entry::{CatalogEntry, KNOWN_FIELDS};
