#![deny(missing_docs)]

//! # Resolve Command
//!
//! Prints the normalized shape tree of the root as JSON.

use crate::error::{CliError, CliResult};
use crate::input::InputArgs;

/// Arguments for the resolve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Graph and root shape.
    #[command(flatten)]
    pub input: InputArgs,
}

/// Renders the resolved tree.
pub fn render(args: &ResolveArgs) -> CliResult<String> {
    let shape = args.input.resolve_root()?;
    serde_json::to_string_pretty(&shape)
        .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))
}

/// Executes the resolve command.
pub fn execute(args: &ResolveArgs) -> CliResult<()> {
    println!("{}", render(args)?);
    Ok(())
}
