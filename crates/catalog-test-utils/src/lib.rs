//! Shared test utilities for the devcontainer catalog workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] — git repository fixtures, from a bare `git2` init up to a
//!   tagged `file://` remote
//! - [`catalog`] — [`catalog::TestCatalog`] builder for on-disk catalog trees

pub mod catalog;
pub mod git;
