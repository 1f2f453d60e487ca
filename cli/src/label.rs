#![deny(missing_docs)]

//! # Label Command
//!
//! Prints the human readable type label of the root shape.

use crate::error::{CliError, CliResult};
use crate::input::InputArgs;
use shapedoc_core::type_label;

/// Arguments for the label command.
#[derive(clap::Args, Debug, Clone)]
pub struct LabelArgs {
    /// Graph and root shape.
    #[command(flatten)]
    pub input: InputArgs,
}

/// Computes the label.
pub fn render(args: &LabelArgs) -> CliResult<String> {
    let shape = args.input.resolve_root()?;
    type_label(&shape, false)
        .ok_or_else(|| CliError::General(format!("Shape '{}' has no type label", shape.id())))
}

/// Executes the label command.
pub fn execute(args: &LabelArgs) -> CliResult<()> {
    println!("{}", render(args)?);
    Ok(())
}
