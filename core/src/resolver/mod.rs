#![deny(missing_docs)]

//! # Resolver
//!
//! The shape-level engine: normalization of references into a concrete tree,
//! scalar classification, type labels, union selection and query parameter
//! flattening. Every function here is synchronous and free of I/O.

/// Reference resolution and cycle cutting.
pub mod normalize;

/// Scalar predicates.
pub mod classify;

/// Human readable type labels.
pub mod labels;

/// Union branch selection.
pub mod unions;

/// Query-string flattening.
pub mod params;

pub use classify::{is_scalar_shape, is_scalar_type, is_scalar_union};
pub use labels::type_label;
pub use normalize::ShapeNormalizer;
pub use params::{flatten_parameters, OperationParameter, ParamBinding};
pub use unions::{provenance_label, select_branch, UnionMember, UnionSelection};
