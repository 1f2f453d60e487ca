//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! The engine itself never fails on data-shape grounds (missing references,
//! cycles and malformed shapes all have a non-error representation). Errors
//! only arise at the edges: reading documents, decoding them and encoding
//! synthesized values.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A graph or OpenAPI document could not be decoded.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A synthesized value could not be serialized for a media type.
    #[from(ignore)]
    #[display("Encode Error: {_0}")]
    Encode(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
