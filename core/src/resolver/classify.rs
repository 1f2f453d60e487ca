//! # Scalar Classification
//!
//! Predicates deciding whether a shape is rendered inline as a leaf value
//! (scalar, nil, file) rather than as a nested structure.

use crate::shape::{Shape, ShapeKind};

/// True iff the variant denotes a scalar, nil or file.
pub fn is_scalar_type<C>(kind: &ShapeKind<C>) -> bool {
    matches!(
        kind,
        ShapeKind::Scalar(_) | ShapeKind::Nil | ShapeKind::File(_)
    )
}

/// Shorthand for `is_scalar_type(&shape.kind)`.
pub fn is_scalar_shape(shape: &Shape) -> bool {
    is_scalar_type(&shape.kind)
}

/// True iff every member of the union's first populated list is scalar.
///
/// Lists are inspected in the order `anyOf`, `or`, `and`, `xone`. A union with
/// no populated list counts as scalar. Non-union shapes are never scalar
/// unions.
pub fn is_scalar_union(shape: &Shape) -> bool {
    let Some(union) = shape.as_union() else {
        return false;
    };
    [&union.any_of, &union.or, &union.and, &union.xone]
        .into_iter()
        .find(|members| !members.is_empty())
        .map_or(true, |members| members.iter().all(is_scalar_shape))
}
