//! Shared test utilities for the pkgm workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: upstream git repositories with real history
//! - [`fake`]: [`FakeVcs`](fake::FakeVcs), an in-memory VCS that records calls
//! - [`sandbox`]: [`Sandbox`](sandbox::Sandbox), a temporary base directory
//! - [`descriptor`]: `repo.json` builders

pub mod descriptor;
pub mod fake;
pub mod git;
pub mod sandbox;
