#![deny(missing_docs)]

//! # Shapedoc Core
//!
//! Shape resolution and example synthesis for API documentation.
//!
//! A `GraphDocument` holds declared and referenced shape definitions. The
//! resolver turns a reference into a concrete, cycle-free `Shape` tree; type
//! labels, union selection, example synthesis and query parameter flattening
//! all operate on that tree. Caller-owned `ViewState` keeps union selections
//! stable across calls.

/// Shared error types.
pub mod error;

/// Normalized shape model.
pub mod shape;

/// Input graph documents.
pub mod graph;

/// Caller-owned view state.
pub mod view;

/// Normalization, classification, labels, unions and parameters.
pub mod resolver;

/// Example synthesis and media-type encoding.
pub mod example;

/// OpenAPI document adapter.
pub mod oas;

/// Code-sample helpers.
pub mod sample;

pub use error::{AppError, AppResult};
pub use example::{synthesize, synthesize_value, MediaType, SynthesisOptions};
pub use graph::GraphDocument;
pub use oas::graph_from_openapi;
pub use resolver::{
    flatten_parameters, is_scalar_shape, is_scalar_type, is_scalar_union, select_branch,
    type_label, OperationParameter, ParamBinding, ShapeNormalizer, UnionMember, UnionSelection,
};
pub use shape::{Example, Shape, ShapeDef, ShapeKind, ShapeRef};
pub use view::{SelectionRegistry, ViewState};
