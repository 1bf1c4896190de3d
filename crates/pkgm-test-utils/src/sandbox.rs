//! Temporary package-manager base directory.

use std::fs;
use std::path::{Path, PathBuf};

use pkgm_fs::Layout;
use tempfile::TempDir;

/// A base directory inside a [`TempDir`], with its [`Layout`].
///
/// The directory is removed when the sandbox is dropped.
pub struct Sandbox {
    temp: TempDir,
    layout: Layout,
}

impl Sandbox {
    /// Empty sandbox with the layout directories created.
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Sandbox: failed to create temp dir");
        let layout = Layout::new(temp.path().join("pkgs"));
        layout
            .ensure_dirs()
            .unwrap_or_else(|e| panic!("Sandbox: ensure_dirs failed: {e}"));
        Self { temp, layout }
    }

    /// Root of the temporary directory, outside the base.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn base(&self) -> &Path {
        self.layout.base()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Create `installed/<name>` containing `files`, as if installed.
    pub fn install_fake_package(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.layout.package_dir(name);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("Sandbox: mkdir {}: {e}", dir.display()));
        for (file, content) in files {
            fs::write(dir.join(file), content)
                .unwrap_or_else(|e| panic!("Sandbox: write {file}: {e}"));
        }
        dir
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.layout.package_dir(name).is_dir()
    }

    /// Sorted names of the entries in `trash/`.
    pub fn trash_names(&self) -> Vec<String> {
        let trash = self.layout.trash_dir();
        let mut names: Vec<String> = match fs::read_dir(&trash) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}
