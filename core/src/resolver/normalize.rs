#![deny(missing_docs)]

//! # Shape Normalization
//!
//! Resolves a shape reference against the declaration tables into a concrete
//! `Shape` tree.
//!
//! - Named references are followed transitively (aliases of aliases).
//! - A per-path visited set cuts cycles: re-entering an id already being
//!   expanded on the current path yields a `Recursive` terminal.
//! - Missing references resolve to `None`. This is not an error; callers render
//!   and synthesize nothing for it.
//! - Inline shapes without an explicit id get a positional id derived from
//!   their parent (`Pet/properties/owner/range`) so selection keys are stable.

use crate::shape::{
    ArrayShape, NodeShape, PropertyShape, Shape, ShapeDef, ShapeKind, ShapeMeta, ShapeRef,
    TupleShape, UnionShape,
};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::HashSet;

/// Resolves references against local declarations and external references.
#[derive(Debug, Clone, Copy)]
pub struct ShapeNormalizer<'g> {
    declarations: &'g IndexMap<String, ShapeRef>,
    references: &'g IndexMap<String, ShapeRef>,
}

impl<'g> ShapeNormalizer<'g> {
    /// Creates a normalizer over two lookup tables. Declarations take
    /// precedence over references with the same id.
    pub fn new(
        declarations: &'g IndexMap<String, ShapeRef>,
        references: &'g IndexMap<String, ShapeRef>,
    ) -> Self {
        Self {
            declarations,
            references,
        }
    }

    /// Resolves `root` into a concrete tree. Returns `None` when the root
    /// reference cannot be found. The root itself is never `Recursive`.
    pub fn resolve(&self, root: &ShapeRef) -> Option<Shape> {
        let mut path = HashSet::new();
        self.resolve_ref(root, "root", &mut path)
    }

    /// Resolves an inline definition. `fallback_id` is used when the
    /// definition carries no id of its own.
    pub fn resolve_def(&self, def: &ShapeDef, fallback_id: &str) -> Shape {
        let mut path = HashSet::new();
        self.expand(def, fallback_id, &mut path)
    }

    fn lookup(&self, id: &str) -> Option<&'g ShapeRef> {
        self.declarations
            .get(id)
            .or_else(|| self.references.get(id))
    }

    fn resolve_ref(
        &self,
        shape_ref: &ShapeRef,
        fallback_id: &str,
        path: &mut HashSet<String>,
    ) -> Option<Shape> {
        let (def, id) = match shape_ref {
            ShapeRef::Inline(def) => (&**def, fallback_id),
            ShapeRef::Ref { target } => {
                let (key, def) = self.dereference(target)?;
                (def, key)
            }
        };
        if matches!(def.kind, ShapeKind::Recursive) {
            debug!(id = id; "Recursive marker in input treated as missing");
            return None;
        }
        Some(self.expand(def, id, path))
    }

    /// Follows a chain of named references to the first concrete definition.
    /// Returns the declaration key of that definition alongside it.
    fn dereference<'a>(&self, target: &'a str) -> Option<(&'a str, &'g ShapeDef)>
    where
        'g: 'a,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current: &'a str = target;
        loop {
            if !seen.insert(current) {
                debug!(id = current; "Alias chain loops without reaching a definition");
                return None;
            }
            match self.lookup(current) {
                Some(ShapeRef::Inline(def)) => return Some((current, &**def)),
                Some(ShapeRef::Ref { target: next }) => current = next.as_str(),
                None => {
                    debug!(id = current; "Reference not found in declarations or references");
                    return None;
                }
            }
        }
    }

    fn expand(&self, def: &ShapeDef, fallback_id: &str, path: &mut HashSet<String>) -> Shape {
        let id = if def.meta.id.is_empty() {
            fallback_id.to_string()
        } else {
            def.meta.id.clone()
        };

        if path.contains(&id) {
            trace!(id = id.as_str(); "Cycle detected, emitting recursive terminal");
            return recursive_terminal(&id, &def.meta);
        }

        path.insert(id.clone());
        let kind = self.expand_kind(&def.kind, &id, path);
        path.remove(&id);

        Shape {
            meta: ShapeMeta {
                id,
                ..def.meta.clone()
            },
            kind,
        }
    }

    fn expand_kind(
        &self,
        kind: &ShapeKind<ShapeRef>,
        id: &str,
        path: &mut HashSet<String>,
    ) -> ShapeKind<Shape> {
        match kind {
            ShapeKind::Scalar(s) => ShapeKind::Scalar(s.clone()),
            ShapeKind::File(f) => ShapeKind::File(f.clone()),
            ShapeKind::Schema(s) => ShapeKind::Schema(s.clone()),
            ShapeKind::Nil => ShapeKind::Nil,
            ShapeKind::Recursive => ShapeKind::Recursive,
            ShapeKind::Node(node) => ShapeKind::Node(self.expand_node(node, id, path)),
            ShapeKind::Array(array) => ShapeKind::Array(ArrayShape {
                items: array
                    .items
                    .as_deref()
                    .and_then(|items| self.resolve_ref(items, &format!("{id}/items"), path))
                    .map(Box::new),
                unique_items: array.unique_items,
                min_items: array.min_items,
                max_items: array.max_items,
            }),
            ShapeKind::Tuple(tuple) => ShapeKind::Tuple(TupleShape {
                items: self.expand_slots(&tuple.items, id, path),
                unique_items: tuple.unique_items,
            }),
            ShapeKind::Union(union) => ShapeKind::Union(UnionShape {
                any_of: self.expand_list(&union.any_of, id, "anyOf", path),
                or: self.expand_list(&union.or, id, "or", path),
                and: self.expand_list(&union.and, id, "and", path),
                xone: self.expand_list(&union.xone, id, "xone", path),
            }),
        }
    }

    fn expand_node(
        &self,
        node: &NodeShape<ShapeRef>,
        id: &str,
        path: &mut HashSet<String>,
    ) -> NodeShape<Shape> {
        let properties = node
            .properties
            .iter()
            .enumerate()
            .map(|(index, prop)| {
                let segment = if prop.name.is_empty() {
                    index.to_string()
                } else {
                    prop.name.clone()
                };
                let prop_id = if prop.id.is_empty() {
                    format!("{id}/properties/{segment}")
                } else {
                    prop.id.clone()
                };
                let range = prop
                    .range
                    .as_ref()
                    .and_then(|r| self.resolve_ref(r, &format!("{prop_id}/range"), path));
                PropertyShape {
                    id: prop_id,
                    name: prop.name.clone(),
                    display_name: prop.display_name.clone(),
                    min_count: prop.min_count,
                    range,
                }
            })
            .collect();

        NodeShape {
            properties,
            inherits: self.expand_list(&node.inherits, id, "inherits", path),
            min_properties: node.min_properties,
            max_properties: node.max_properties,
        }
    }

    /// Tuple slots keep their positions; an unresolvable slot is `None`.
    fn expand_slots(
        &self,
        slots: &[Option<ShapeRef>],
        id: &str,
        path: &mut HashSet<String>,
    ) -> Vec<Option<Shape>> {
        slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.as_ref()
                    .and_then(|r| self.resolve_ref(r, &format!("{id}/items/{index}"), path))
            })
            .collect()
    }

    /// Unresolvable members are dropped.
    fn expand_list(
        &self,
        refs: &[ShapeRef],
        id: &str,
        segment: &str,
        path: &mut HashSet<String>,
    ) -> Vec<Shape> {
        refs.iter()
            .enumerate()
            .filter_map(|(index, r)| self.resolve_ref(r, &format!("{id}/{segment}/{index}"), path))
            .collect()
    }
}

fn recursive_terminal(id: &str, meta: &ShapeMeta) -> Shape {
    Shape {
        meta: ShapeMeta {
            id: id.to_string(),
            name: meta.name.clone(),
            display_name: meta.display_name.clone(),
            ..ShapeMeta::default()
        },
        kind: ShapeKind::Recursive,
    }
}
