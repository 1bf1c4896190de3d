//! Filesystem layer for pkgm
//!
//! Owns the on-disk layout under the package-manager base directory,
//! atomic writes, advisory name locks, and the persisted options file.

pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod lock;
pub mod options;
pub mod path;

pub use constants::PkgPath;
pub use error::{Error, Result};
pub use layout::Layout;
pub use lock::{LockScope, NameLock};
pub use options::Options;
pub use path::validate_pkg_name;
