//! Git access for the devcontainer catalog
//!
//! Parses catalog locators, fetches disposable shallow clones through the
//! [`Fetcher`] port, and resolves the newest compatible release tag.

pub mod cli;
pub mod error;
pub mod fetcher;
pub mod libgit;
pub mod locator;
pub mod tags;

pub use cli::GitCliFetcher;
pub use error::{Error, FetchOperation, Result};
pub use fetcher::{Fetcher, LocalClone};
pub use libgit::Git2Fetcher;
pub use locator::{Locator, parse_locator};
pub use tags::{resolve_latest_tag, resolve_locator, select_latest_tag};
