//! # Repository Build Configuration Library
//!
//! This library reads the build configuration a repository carries for a
//! container image build service and aggregates it into a single object a
//! build orchestrator can query. It is used by the `repo-config` command-line
//! tool but is meant to be embedded in the orchestrator itself.
//!
//! ## Quick Example
//!
//! ```
//! use repo_config::repo_config::RepoConfiguration;
//! use repo_config::repo_info::RepoInfo;
//! use repo_config::labels::LabelType;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(
//!     dir.path().join("container.yaml"),
//!     "compose:\n  modules:\n  - eog:f28\nflatpak:\n  id: org.gnome.Eog\n",
//! )
//! .unwrap();
//!
//! let config = RepoConfiguration::from_dir(dir.path()).unwrap();
//! let info = RepoInfo::new(None, Some(config), None).unwrap();
//! assert_eq!(info.labels().unwrap().value_of(LabelType::Name), Some("eog"));
//! assert_eq!(info.labels().unwrap().value_of(LabelType::Version), Some("f28"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Schema validation (`schema`)**: parses YAML and validates it against a
//!   bundled JSON schema, reporting every violation with its path.
//! - **Module specifications (`module_spec`)**: the
//!   `NAME:STREAM[:VERSION[:CONTEXT]][/PROFILE]` grammar of compose modules.
//! - **Additional tags (`tags`)**: extra image tags from `container.yaml` or
//!   an `additional-tags` file.
//! - **Repository configuration (`repo_config`)**: the autorebuild INI flag,
//!   `container.yaml`, module specs and flatpak settings of one directory.
//! - **Repository info (`repo_info`)**: combines the above with the
//!   Dockerfile (`dockerfile`) and derives image labels (`labels`) and the
//!   base image on first use.

pub mod defaults;
pub mod dockerfile;
pub mod error;
pub mod labels;
pub mod module_spec;
pub mod repo_config;
pub mod repo_info;
pub mod schema;
pub mod tags;

#[cfg(test)]
mod module_spec_proptest;
