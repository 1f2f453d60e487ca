#![deny(missing_docs)]

//! # Shapedoc CLI
//!
//! Command Line Interface for the shape resolution and example synthesis engine.
//!
//! Supported Commands:
//! - `resolve`: Prints the normalized shape tree of a declaration.
//! - `label`: Prints the type label of a declaration.
//! - `example`: Synthesizes an example payload for a media type.
//! - `params`: Flattens a declaration into request parameters.

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use log::{debug, error, info, LevelFilter};

use crate::config::load_config;
use crate::error::CliResult;

mod config;
mod error;
mod example;
mod input;
mod label;
mod params;
mod resolve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Shape resolution and example synthesis CLI")]
struct Cli {
    /// Path to a TOML configuration file.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace).
    #[clap(long, global = true, default_value = "warn", env = "SHAPEDOC_LOG")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the normalized shape tree as JSON.
    Resolve(resolve::ResolveArgs),
    /// Prints the human readable type label.
    Label(label::LabelArgs),
    /// Synthesizes an example payload.
    Example(example::ExampleArgs),
    /// Lists the request parameters a shape flattens into.
    Params(params::ParamsArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    debug!(config:?; "Configuration loaded");

    match &cli.command {
        Commands::Resolve(args) => resolve::execute(args),
        Commands::Label(args) => label::execute(args),
        Commands::Example(args) => example::execute(args, &config),
        Commands::Params(args) => params::execute(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            cli.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting shapedoc");

    if let Err(err) = run(&cli) {
        error!(err:err; "Command failed");
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
