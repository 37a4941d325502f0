//! # Repository Config CLI
//!
//! `repo-config` inspects a repository the way an image build would see it.
//!
//! - `show`: the aggregated configuration, labels and tags as JSON.
//! - `validate`: load `container.yaml` and report its modules and tags.
//! - `module`: normalize one module specification.
//!
//! Loading and validation live in the `repo_config` library; errors from it
//! reach the user through `anyhow`.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
