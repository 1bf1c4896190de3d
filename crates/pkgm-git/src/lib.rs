//! Version-control adapter for pkgm
//!
//! Wraps `clone`, `pull`, and `reset` as blocking subprocess invocations of
//! a configured git binary. A non-zero exit status is data, returned in
//! [`VcsOutput`]; only failing to run the binary at all is an [`Error`].

pub mod cli;
pub mod error;
pub mod provider;

pub use cli::GitCli;
pub use error::{Error, Result};
pub use provider::{CloneOptions, Vcs, VcsOutput};
