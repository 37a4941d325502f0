//! # Module Command Implementation
//!
//! This module implements the `module` subcommand, which parses a module
//! specification (`NAME:STREAM[:VERSION[:CONTEXT]][/PROFILE]`) and prints its
//! normalized form followed by the individual fields.

use anyhow::Result;
use clap::Args;

use repo_config::module_spec::ModuleSpec;

/// Parse and normalize a module specification
#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Module specification to parse.
    #[arg(value_name = "SPEC")]
    pub spec: String,

    /// Leave the `/PROFILE` suffix out of the normalized form.
    #[arg(long)]
    pub no_profile: bool,
}

/// Execute the `module` command.
pub fn execute(args: ModuleArgs) -> Result<()> {
    let spec: ModuleSpec = args.spec.parse()?;

    println!("{}", spec.to_str(!args.no_profile));
    println!("name: {}", spec.name);
    println!("stream: {}", spec.stream);
    let optional = [
        ("version", &spec.version),
        ("context", &spec.context),
        ("profile", &spec.profile),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            println!("{}: {}", field, value);
        }
    }

    Ok(())
}
