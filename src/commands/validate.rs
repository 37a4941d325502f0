//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which loads every
//! configuration file of a repository and reports whether a build could use
//! them.
//!
//! ## Functionality
//!
//! - **Repository Config**: Reads the INI file and reports the autorebuild flag.
//! - **Container Config**: Validates `container.yaml` against its schema and
//!   parses every compose module specification.
//! - **Flatpak**: For Flatpak repositories, derives the image labels, which
//!   requires at least one compose module.
//! - **Additional Tags**: Reports the tags that would be applied.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use repo_config::labels::LabelType;
use repo_config::repo_config::RepoConfiguration;
use repo_config::repo_info::RepoInfo;

use super::RepoArgs;

/// Load and validate the configuration files of a repository
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub repo: RepoArgs,
}

/// Execute the `validate` command.
///
/// Prints a short summary of the loaded configuration and fails with the
/// library's error message if anything does not load.
pub fn execute(args: ValidateArgs) -> Result<()> {
    println!("Validating repository: {}", args.repo.dir.display());

    let configuration = match RepoConfiguration::load(args.repo.options()) {
        Ok(configuration) => {
            println!("[OK] Configuration files loaded successfully");
            configuration
        }
        Err(e) => {
            println!("[ERR] Configuration loading failed: {}", e);
            return Err(anyhow::anyhow!("Configuration loading failed: {}", e));
        }
    };

    println!(
        "   Autorebuild enabled: {}",
        configuration.is_autorebuild_enabled()
    );
    println!(
        "   Compose modules: {}",
        configuration.container_module_specs.len()
    );
    for module in &configuration.container_module_specs {
        println!("     - {}", module);
    }

    let is_flatpak = configuration.is_flatpak;
    let info = RepoInfo::new(None, Some(configuration), None)?;

    if is_flatpak {
        let labels = info.labels().map_err(|e| {
            println!("[ERR] Flatpak configuration invalid: {}", e);
            anyhow::anyhow!("Flatpak configuration invalid: {}", e)
        })?;
        println!("[OK] Flatpak configuration valid");
        for label_type in [LabelType::Name, LabelType::Component, LabelType::Version] {
            if let Some((name, value)) = labels.get_name_and_value(label_type) {
                println!("   {}: {}", name, value);
            }
        }
    }

    let mut tags = info.additional_tags().tags();
    tags.sort();
    println!("   Additional tags: {}", tags.join(", "));

    println!("[OK] Repository configuration is valid");
    Ok(())
}
