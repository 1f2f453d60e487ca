#![deny(missing_docs)]

//! # OpenAPI Adapter
//!
//! - **normalization**: rewrites equivalent schema spellings into one form.
//! - **ref_utils**: maps `$ref` strings onto graph document ids.
//! - **lower**: converts component schemas into graph declarations.

pub(crate) mod normalization;
pub(crate) mod ref_utils;

/// Component schema lowering.
pub mod lower;

pub use lower::graph_from_openapi;
