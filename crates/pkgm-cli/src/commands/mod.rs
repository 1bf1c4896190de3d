//! Command implementations for pkgm-cli
//!
//! Every handler writes its report through a [`MessageSink`] so the text
//! can be captured in tests.
//!
//! [`MessageSink`]: pkgm_core::MessageSink

pub mod catalog;
pub mod config;
pub mod package;

pub use catalog::{run_list_all, run_search, run_update};
pub use config::run_config;
pub use package::{run_install, run_list, run_uninstall, run_upgrade};

/// Message for an empty `installed/`.
pub const NO_PACKAGES: &str = "There are no packages installed";

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use pkgm_core::{MessageSink, NullHost, Options, PackageManager};
    use pkgm_test_utils::fake::FakeVcs;
    use pkgm_test_utils::sandbox::Sandbox;

    pub const CENTRAL: &str = "https://example.test/central.git";

    /// Collects delivered reports.
    #[derive(Default)]
    pub struct BufferSink(RefCell<Vec<String>>);

    impl BufferSink {
        pub fn text(&self) -> String {
            self.0.borrow().join("\n")
        }
    }

    impl MessageSink for BufferSink {
        fn deliver(&self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }
    }

    pub fn manager(sandbox: &Sandbox, vcs: &FakeVcs) -> PackageManager {
        let options = Options {
            central_repo_url: CENTRAL.to_string(),
            ..Options::default()
        };
        PackageManager::open(
            sandbox.layout().clone(),
            options,
            Box::new(vcs.clone()),
            Box::new(NullHost),
            Box::new(NullHost),
        )
        .unwrap()
    }
}
