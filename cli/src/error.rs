#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use shapedoc_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the engine (parsing, encoding).
    #[display("{}", _0)]
    Core(AppError),

    /// Configuration file could not be used.
    #[display("Configuration error: {}", _0)]
    #[from(ignore)]
    Config(String),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
