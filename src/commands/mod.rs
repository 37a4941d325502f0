//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `repo-config` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `repo_config` library.

pub mod module;
pub mod show;
pub mod validate;

use std::path::PathBuf;

use clap::Args;
use repo_config::defaults::{REPO_CONFIG_FILE, REPO_CONTAINER_CONFIG};
use repo_config::repo_config::RepoConfigOptions;

/// Arguments locating a repository's configuration files.
#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Repository directory holding the configuration files.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Name of the INI file with the `[autorebuild]` section.
    #[arg(long, value_name = "NAME", default_value = REPO_CONFIG_FILE)]
    pub config_file: String,

    /// Name of the container configuration YAML file.
    #[arg(long, value_name = "NAME", default_value = REPO_CONTAINER_CONFIG)]
    pub container_file: String,
}

impl RepoArgs {
    pub fn options(&self) -> RepoConfigOptions {
        RepoConfigOptions {
            config_file_name: self.config_file.clone(),
            container_file_name: self.container_file.clone(),
            ..RepoConfigOptions::new(&self.dir)
        }
    }
}
