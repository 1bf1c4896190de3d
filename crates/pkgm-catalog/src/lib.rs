//! Package catalog for pkgm.
//!
//! Parses `repo.json` metadata descriptors into [`Catalog`] values and
//! answers search, listing, and lookup queries against them.

pub mod catalog;
pub mod entry;
pub mod error;

pub use catalog::{Catalog, read_package_metadata};
pub use entry::CatalogEntry;
pub use error::{Error, Result};
