//! # Inheritance View
//!
//! Flattens a node's inheritance chain into an explicit ordered list of
//! `(source, properties)` groups. Parents are never modified; the view only
//! borrows from the resolved tree.
//!
//! An `and` union in the chain stands for all of its members: each member is
//! visited as an ancestor in its own right.
//!
//! Properties sharing a name across groups are all kept. Which one wins is a
//! presentation decision left to the caller.

use super::{NodeShape, PropertyShape, Shape, ShapeKind, ShapeMeta, UnionMode, UnionShape};

/// One contiguous run of properties and the shape that declared them.
#[derive(Debug, Clone, Copy)]
pub struct PropertyGroup<'a> {
    /// Declaring ancestor. `None` for the node's own properties.
    pub source: Option<&'a ShapeMeta>,
    /// Properties in declaration order.
    pub properties: &'a [PropertyShape<Shape>],
}

impl NodeShape<Shape> {
    /// Own properties first, then each ancestor depth-first in declared order.
    pub fn property_groups(&self) -> Vec<PropertyGroup<'_>> {
        let mut groups = vec![PropertyGroup {
            source: None,
            properties: &self.properties,
        }];
        for parent in &self.inherits {
            collect_ancestor(parent, &mut groups);
        }
        groups
    }

    /// Every property visible on this node, without de-duplication.
    pub fn effective_properties(&self) -> impl Iterator<Item = &PropertyShape<Shape>> {
        self.property_groups()
            .into_iter()
            .flat_map(|group| group.properties.iter())
    }

    /// Ancestors in the same order `property_groups` visits them.
    pub fn ancestors(&self) -> Vec<&Shape> {
        let mut out = Vec::new();
        for parent in &self.inherits {
            collect_ancestor_shapes(parent, &mut out);
        }
        out
    }
}

/// Shapes an ancestor inherits from in turn.
fn parents_of(shape: &Shape) -> &[Shape] {
    match &shape.kind {
        ShapeKind::Node(node) => &node.inherits,
        ShapeKind::Union(union) => combined_members(union),
        _ => &[],
    }
}

fn combined_members(union: &UnionShape<Shape>) -> &[Shape] {
    match union.branches() {
        Some((UnionMode::And, members)) => members,
        _ => &[],
    }
}

fn collect_ancestor<'a>(shape: &'a Shape, groups: &mut Vec<PropertyGroup<'a>>) {
    // Recursive and alternative ancestors have nothing to contribute.
    if let ShapeKind::Node(node) = &shape.kind {
        groups.push(PropertyGroup {
            source: Some(&shape.meta),
            properties: &node.properties,
        });
    }
    for parent in parents_of(shape) {
        collect_ancestor(parent, groups);
    }
}

fn collect_ancestor_shapes<'a>(shape: &'a Shape, out: &mut Vec<&'a Shape>) {
    out.push(shape);
    for parent in parents_of(shape) {
        collect_ancestor_shapes(parent, out);
    }
}
