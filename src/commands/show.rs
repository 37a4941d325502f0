//! # Show Command Implementation
//!
//! This module implements the `show` subcommand, which loads a repository's
//! configuration exactly as a build would and prints the result as JSON:
//! the configuration fields, the autorebuild flag, the additional tags, and
//! the derived labels and base image.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use repo_config::defaults::ADDITIONAL_TAGS_FILE;
use repo_config::dockerfile::DockerfileParser;
use repo_config::repo_config::{RepoConfigOptions, RepoConfiguration};
use repo_config::repo_info::RepoInfo;
use repo_config::tags::AdditionalTagsConfig;

use super::RepoArgs;

/// Print the aggregated configuration of a repository as JSON
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Dockerfile to read labels and base image from.
    ///
    /// Defaults to `Dockerfile` in the repository directory.
    #[arg(long, value_name = "FILE")]
    pub dockerfile: Option<PathBuf>,

    /// Additional tag; overrides the tags file. May be repeated.
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Git commit depth to record.
    #[arg(long, value_name = "N")]
    pub depth: Option<u32>,

    /// Git URI to record.
    #[arg(long, value_name = "URI")]
    pub git_uri: Option<String>,

    /// Git branch to record.
    #[arg(long, value_name = "BRANCH")]
    pub git_branch: Option<String>,

    /// Git ref to record.
    #[arg(long, value_name = "REF")]
    pub git_ref: Option<String>,
}

/// Execute the `show` command.
pub fn execute(args: ShowArgs) -> Result<()> {
    let options = RepoConfigOptions {
        depth: args.depth,
        git_uri: args.git_uri.clone(),
        git_branch: args.git_branch.clone(),
        git_ref: args.git_ref.clone(),
        ..args.repo.options()
    };
    let configuration = RepoConfiguration::load(options).with_context(|| {
        format!(
            "Failed to load repository configuration from {}",
            args.repo.dir.display()
        )
    })?;

    let additional_tags = if args.tags.is_empty() {
        None
    } else {
        Some(AdditionalTagsConfig::new(
            &args.repo.dir,
            ADDITIONAL_TAGS_FILE,
            &args.tags,
        )?)
    };

    let dockerfile = DockerfileParser::new(
        args.dockerfile
            .clone()
            .unwrap_or_else(|| args.repo.dir.clone()),
    );
    let info = RepoInfo::new(Some(Box::new(dockerfile)), Some(configuration), additional_tags)?;

    let mut tags = info.additional_tags().tags();
    tags.sort();

    let output = json!({
        "configuration": info.configuration(),
        "autorebuild_enabled": info.configuration().is_autorebuild_enabled(),
        "additional_tags": tags,
        "tags_from_container_yaml": info.additional_tags().from_container_yaml(),
        "labels": info.labels()?,
        "base_image": info.base_image()?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
