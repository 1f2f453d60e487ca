#![deny(missing_docs)]

//! # Params Command
//!
//! Flattens the root shape into request parameters and prints one row per
//! parameter, optionally followed by a sample request URL.

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::input::InputArgs;
use serde_json::json;
use shapedoc_core::sample::{parameter_value, url_with_query};
use shapedoc_core::{flatten_parameters, type_label, ParamBinding, SelectionRegistry};

/// Arguments for the params command.
#[derive(clap::Args, Debug, Clone)]
pub struct ParamsArgs {
    /// Graph and root shape.
    #[command(flatten)]
    pub input: InputArgs,

    /// Where the parameters are sent: query, header, cookie or uri.
    #[clap(long, default_value = "query")]
    pub binding: ParamBinding,

    /// Base URL for a sample request. Path templates like `{id}` are filled in.
    #[clap(long)]
    pub base_url: Option<String>,
}

/// Renders the parameter table as JSON, plus the sample URL when asked for.
pub fn render(args: &ParamsArgs, config: &CliConfig) -> CliResult<String> {
    let shape = args.input.resolve_root()?;
    let params = flatten_parameters(&shape, args.binding, Some(shape.id()));
    let mut registry = SelectionRegistry::new();

    let rows: Vec<_> = params
        .iter()
        .map(|param| {
            json!({
                "name": param.name,
                "binding": param.binding,
                "required": param.required,
                "type": param.schema.and_then(|s| type_label(s, false)),
                "example": parameter_value(param, &mut registry, &config.synthesis),
            })
        })
        .collect();

    let mut out = serde_json::to_string_pretty(&rows)
        .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?;

    if let Some(base) = &args.base_url {
        let url = url_with_query(base, &params, &mut registry, &config.synthesis)?;
        out.push('\n');
        out.push_str(&url);
    }
    Ok(out)
}

/// Executes the params command.
pub fn execute(args: &ParamsArgs, config: &CliConfig) -> CliResult<()> {
    println!("{}", render(args, config)?);
    Ok(())
}
