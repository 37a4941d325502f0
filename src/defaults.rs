//! Default values for repository configuration.
//!
//! This module provides centralized default file names and resource
//! identifiers used across the library and the CLI, ensuring consistency and
//! avoiding duplication.

/// Name of the INI file holding the `[autorebuild]` flag.
pub const REPO_CONFIG_FILE: &str = ".osbs-repo-config";

/// Name of the YAML container configuration file.
pub const REPO_CONTAINER_CONFIG: &str = "container.yaml";

/// Name of the plain-text file listing one additional tag per line.
pub const ADDITIONAL_TAGS_FILE: &str = "additional-tags";

/// Identifier of the bundled schema used to validate `container.yaml`.
pub const CONTAINER_SCHEMA: &str = "schemas/container.json";

/// Settings applied before the INI file is read.
///
/// Values present in the repository's file override these.
pub const DEFAULT_REPO_CONFIG: &str = "[autorebuild]\nenabled = false\n";
