#![deny(missing_docs)]

//! # Type Labels
//!
//! Derives the human readable type string shown next to a property
//! (`String`, `List of Pet`, `String or Number`).
//!
//! Labels are pure functions of the resolved tree: no lookups, no state.

use crate::resolver::classify::is_scalar_shape;
use crate::shape::scalar::type_display_name;
use crate::shape::{NodeShape, ScalarShape, Shape, ShapeKind, UnionMode, UnionShape};

/// Placeholder name given to anonymous array item shapes.
const ITEMS_PLACEHOLDER: &str = "items";

/// Placeholder name given to anonymous inline types.
const TYPE_PLACEHOLDER: &str = "type";

/// Label of a shape with no usable name.
const UNKNOWN: &str = "Unknown";

/// Computes the type label of a shape.
///
/// `nested_in_array` is set when labelling the item shape of an array or tuple;
/// it enables collapsing a single-scalar-property wrapper node to the scalar's
/// type name.
///
/// Returns `None` for lists without items and unions without labelled members.
pub fn type_label(shape: &Shape, nested_in_array: bool) -> Option<String> {
    match &shape.kind {
        ShapeKind::Nil => Some("Nil".to_string()),
        ShapeKind::Scalar(scalar) => Some(scalar_label(scalar).unwrap_or_else(|| fallback(shape))),
        ShapeKind::Tuple(tuple) => {
            let inner = match tuple.items.first()? {
                Some(first) => type_label(first, true).unwrap_or_else(|| fallback(first)),
                None => UNKNOWN.to_string(),
            };
            Some(format!("List of {inner}"))
        }
        ShapeKind::Array(array) => {
            let items = array.items.as_deref()?;
            let inner = match type_label(items, true) {
                Some(label) if label == ITEMS_PLACEHOLDER && !is_scalar_shape(items) => {
                    "objects".to_string()
                }
                Some(label) => label,
                None => fallback(items),
            };
            Some(format!("List of {inner}"))
        }
        ShapeKind::Node(node) => Some(node_label(shape, node, nested_in_array)),
        ShapeKind::Union(union) => union_label(union),
        ShapeKind::File(_) => Some("File".to_string()),
        ShapeKind::Schema(_) | ShapeKind::Recursive => Some(fallback(shape)),
    }
}

fn scalar_label(scalar: &ScalarShape) -> Option<String> {
    type_display_name(&scalar.data_type)
}

fn node_label(shape: &Shape, node: &NodeShape<Shape>, nested_in_array: bool) -> String {
    if nested_in_array {
        if let [only] = node.properties.as_slice() {
            if let Some(scalar) = only.range.as_ref().and_then(Shape::as_scalar) {
                if let Some(label) = scalar_label(scalar) {
                    return label;
                }
            }
        }
    }
    match shape.name() {
        Some(name) if !name.is_empty() && name != TYPE_PLACEHOLDER => name.to_string(),
        _ => "Object".to_string(),
    }
}

fn union_label(union: &UnionShape<Shape>) -> Option<String> {
    let (mode, members) = union.branches()?;
    let separator = if mode == UnionMode::And {
        " and "
    } else {
        " or "
    };
    let labels: Vec<String> = members
        .iter()
        .filter_map(|member| type_label(member, false))
        .collect();
    if labels.is_empty() {
        None
    } else {
        Some(labels.join(separator))
    }
}

fn fallback(shape: &Shape) -> String {
    shape
        .name()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ArrayShape, PropertyShape, SchemaShape, TupleShape};

    fn scalar(id: &str, data_type: &str) -> Shape {
        Shape::new(id, ShapeKind::Scalar(ScalarShape::of(data_type)))
    }

    fn node(id: &str, name: &str, props: Vec<(&str, Shape)>) -> Shape {
        Shape::new(
            id,
            ShapeKind::Node(NodeShape {
                properties: props
                    .into_iter()
                    .map(|(n, range)| PropertyShape {
                        id: format!("{id}/properties/{n}"),
                        name: n.to_string(),
                        display_name: None,
                        min_count: 1,
                        range: Some(range),
                    })
                    .collect(),
                ..NodeShape::default()
            }),
        )
        .named(name)
    }

    fn array_of(items: Shape) -> Shape {
        Shape::new(
            "arr",
            ShapeKind::Array(ArrayShape {
                items: Some(Box::new(items)),
                unique_items: false,
                min_items: None,
                max_items: None,
            }),
        )
    }

    #[test]
    fn test_scalar_labels_title_cased() {
        let s = scalar("s", "http://www.w3.org/2001/XMLSchema#string");
        assert_eq!(type_label(&s, false).as_deref(), Some("String"));
        let dt = scalar("d", "http://www.w3.org/2001/XMLSchema#dateTime");
        assert_eq!(type_label(&dt, false).as_deref(), Some("DateTime"));
    }

    #[test]
    fn test_nil_file_and_fallbacks() {
        assert_eq!(
            type_label(&Shape::new("n", ShapeKind::Nil), false).as_deref(),
            Some("Nil")
        );
        let file = Shape::new("f", ShapeKind::File(Default::default()));
        assert_eq!(type_label(&file, false).as_deref(), Some("File"));
        let schema = Shape::new("x", ShapeKind::Schema(SchemaShape::default()));
        assert_eq!(type_label(&schema, false).as_deref(), Some("Unknown"));
        let rec = Shape::new("Pet", ShapeKind::Recursive).named("Pet");
        assert_eq!(type_label(&rec, false).as_deref(), Some("Pet"));
    }

    #[test]
    fn test_node_name_and_placeholder() {
        let pet = node("Pet", "Pet", vec![("id", scalar("i", "integer"))]);
        assert_eq!(type_label(&pet, false).as_deref(), Some("Pet"));
        let anon = node("x", "type", vec![("id", scalar("i", "integer"))]);
        assert_eq!(type_label(&anon, false).as_deref(), Some("Object"));
    }

    #[test]
    fn test_array_labels() {
        let pets = array_of(node("Pet", "Pet", vec![("id", scalar("i", "integer")), ("name", scalar("n", "string"))]));
        assert_eq!(type_label(&pets, false).as_deref(), Some("List of Pet"));

        let anon_items = array_of(node("it", "items", vec![]));
        assert_eq!(type_label(&anon_items, false).as_deref(), Some("List of objects"));

        let strings = array_of(scalar("s", "string"));
        assert_eq!(type_label(&strings, false).as_deref(), Some("List of String"));

        let empty = Shape::new(
            "e",
            ShapeKind::Array(ArrayShape {
                items: None,
                unique_items: false,
                min_items: None,
                max_items: None,
            }),
        );
        assert_eq!(type_label(&empty, false), None);
    }

    #[test]
    fn test_array_of_single_scalar_wrapper_collapses() {
        let wrapper = node("W", "Wrapper", vec![("value", scalar("v", "number"))]);
        let list = array_of(wrapper.clone());
        assert_eq!(type_label(&list, false).as_deref(), Some("List of Number"));
        // Outside an array the wrapper keeps its own name.
        assert_eq!(type_label(&wrapper, false).as_deref(), Some("Wrapper"));
    }

    #[test]
    fn test_tuple_uses_first_slot() {
        let tuple = Shape::new(
            "t",
            ShapeKind::Tuple(TupleShape {
                items: vec![Some(scalar("a", "integer")), Some(scalar("b", "string"))],
                unique_items: false,
            }),
        );
        assert_eq!(type_label(&tuple, false).as_deref(), Some("List of Integer"));
        let unresolved_first = Shape::new(
            "t",
            ShapeKind::Tuple(TupleShape {
                items: vec![None, Some(scalar("b", "string"))],
                unique_items: false,
            }),
        );
        assert_eq!(
            type_label(&unresolved_first, false).as_deref(),
            Some("List of Unknown")
        );
        let empty = Shape::new("t", ShapeKind::Tuple(TupleShape { items: vec![], unique_items: false }));
        assert_eq!(type_label(&empty, false), None);
    }

    #[test]
    fn test_union_label_joins_branches() {
        let union = Shape::new(
            "u",
            ShapeKind::Union(UnionShape {
                any_of: vec![
                    scalar("s", "string"),
                    scalar("n", "number"),
                    node("Product", "Product", vec![("sku", scalar("k", "string")), ("qty", scalar("q", "integer"))]),
                ],
                ..UnionShape::default()
            }),
        );
        let first = type_label(&union, false);
        assert_eq!(first.as_deref(), Some("String or Number or Product"));
        // Repeated calls are stable.
        assert_eq!(type_label(&union, false), first);
    }

    #[test]
    fn test_and_union_label() {
        let union = Shape::new(
            "u",
            ShapeKind::Union(UnionShape {
                and: vec![node("A", "NewPet", vec![]), node("B", "Error", vec![])],
                ..UnionShape::default()
            }),
        );
        assert_eq!(type_label(&union, false).as_deref(), Some("NewPet and Error"));
    }

    #[test]
    fn test_or_and_xone_union_labels() {
        let or_only = Shape::new(
            "u",
            ShapeKind::Union(UnionShape {
                or: vec![scalar("s", "string"), scalar("b", "boolean")],
                ..UnionShape::default()
            }),
        );
        assert_eq!(type_label(&or_only, false).as_deref(), Some("String or Boolean"));

        let xone_only = Shape::new(
            "u",
            ShapeKind::Union(UnionShape {
                xone: vec![node("C", "Cat", vec![]), node("D", "Dog", vec![])],
                ..UnionShape::default()
            }),
        );
        assert_eq!(type_label(&xone_only, false).as_deref(), Some("Cat or Dog"));

        // anyOf takes priority over the other lists.
        let mixed = Shape::new(
            "u",
            ShapeKind::Union(UnionShape {
                any_of: vec![scalar("n", "number")],
                or: vec![scalar("s", "string")],
                and: vec![node("A", "NewPet", vec![])],
                ..UnionShape::default()
            }),
        );
        assert_eq!(type_label(&mixed, false).as_deref(), Some("Number"));
    }
}
