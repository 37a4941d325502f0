//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestRepo::new().with_container(configs::FLATPAK);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestRepo;
}

/// Common `container.yaml` snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Flatpak build naming the image after its first module.
    pub const FLATPAK: &str = r#"
compose:
    modules:
    - mod_name:mod_stream:mod_version
flatpak:
    id: org.gnome.Eog
"#;

    /// Flatpak section without any compose modules.
    pub const FLATPAK_NO_MODULES: &str = r#"
flatpak: {}
compose:
    packages:
    - eog
"#;

    /// One malformed module (missing stream) next to a valid one.
    pub const BAD_MODULE: &str = r#"
compose:
    modules:
    - name
    - name:stream
"#;

    /// Tags supplied from container.yaml.
    pub const WITH_TAGS: &str = r#"
tags:
- from_yaml
- also.from_yaml
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "hallo: 1\nbye";
}

/// A temporary repository directory with builder-style setup.
#[allow(dead_code)]
pub struct TestRepo {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestRepo {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    pub fn with_container(self, yaml: &str) -> Self {
        self.temp.child("container.yaml").write_str(yaml).unwrap();
        self
    }

    pub fn with_repo_config(self, ini: &str) -> Self {
        self.temp.child(".osbs-repo-config").write_str(ini).unwrap();
        self
    }

    pub fn with_additional_tags(self, tags: &str) -> Self {
        self.temp.child("additional-tags").write_str(tags).unwrap();
        self
    }

    pub fn with_dockerfile(self, content: &str) -> Self {
        self.temp.child("Dockerfile").write_str(content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}
