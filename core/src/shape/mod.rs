#![deny(missing_docs)]

//! # Shape Model
//!
//! The normalized type-graph the engine operates on.
//!
//! A shape is a piece of shared metadata (`ShapeMeta`) plus a variant payload
//! (`ShapeKind`). The payload is generic over the type used for nested shape
//! positions:
//!
//! - `ShapeDef` (`ShapeKind<ShapeRef>`) is the input form. Nested positions are
//!   either inline definitions or `$ref` pointers into the graph document.
//! - `Shape` (`ShapeKind<Shape>`) is the resolved tree produced by the
//!   normalizer. Nested positions are concrete shapes, and cycles are cut into
//!   `ShapeKind::Recursive` terminals.

pub mod inheritance;
pub mod scalar;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub use inheritance::PropertyGroup;
pub use scalar::ScalarType;

/// Metadata shared by every shape variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeMeta {
    /// Stable identity key. Empty on input definitions that rely on their
    /// declaration key or position for identity.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Type name (e.g. `Pet`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only present in responses.
    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,
    /// Only present in requests.
    #[serde(default, skip_serializing_if = "is_false")]
    pub write_only: bool,
    /// Marked as deprecated by the author.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Author supplied examples.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Variant payload of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShapeKind<C> {
    /// Primitive value.
    Scalar(ScalarShape),
    /// Object with named properties.
    Node(NodeShape<C>),
    /// Homogeneous list.
    Array(ArrayShape<C>),
    /// Positional list.
    Tuple(TupleShape<C>),
    /// Alternative or combined composition.
    Union(UnionShape<C>),
    /// Uploaded file.
    File(FileShape),
    /// Foreign schema embedded verbatim.
    Schema(SchemaShape),
    /// The null type.
    Nil,
    /// Back-reference to a shape already being expanded on the current path.
    /// Produced by normalization only, never read from a document.
    #[serde(skip_deserializing)]
    Recursive,
}

/// Scalar constraints and hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarShape {
    /// Type identifier, either a bare name (`string`) or a URI whose trailing
    /// segment names the type (`http://www.w3.org/2001/XMLSchema#integer`).
    #[serde(default)]
    pub data_type: String,
    /// Format modifier (`int64`, `rfc2616`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Regular expression constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Value must be a multiple of this number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    /// Default value as authored (always text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_str: Option<String>,
    /// Enumerated literals.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<JsonValue>,
}

impl ScalarShape {
    /// Creates a scalar of the given data type with no constraints.
    pub fn of(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    /// Classifies `data_type`.
    pub fn scalar_type(&self) -> ScalarType {
        ScalarType::from_data_type(&self.data_type)
    }
}

/// Object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeShape<C> {
    /// Own properties in declaration order.
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyShape<C>>,
    /// Parent shapes in declaration order.
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<C>,
    /// Minimum number of properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    /// Maximum number of properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
}

impl<C> Default for NodeShape<C> {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            inherits: Vec::new(),
            min_properties: None,
            max_properties: None,
        }
    }
}

/// A named property of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyShape<C> {
    /// Stable identity key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Key used in payloads.
    pub name: String,
    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Required iff greater than zero.
    #[serde(default)]
    pub min_count: u32,
    /// Value shape. `None` when the graph is malformed or the reference
    /// could not be resolved.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub range: Option<C>,
}

impl<C> PropertyShape<C> {
    /// Whether the property must be present.
    pub fn is_required(&self) -> bool {
        self.min_count > 0
    }
}

/// Homogeneous list shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayShape<C> {
    /// Item shape.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<C>>,
    /// Items must be distinct.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique_items: bool,
    /// Minimum number of items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Maximum number of items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
}

/// Positional list shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleShape<C> {
    /// One shape per slot. A slot whose reference cannot be resolved stays in
    /// place as `None` so later slots keep their positions.
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<C>>,
    /// Items must be distinct.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique_items: bool,
}

/// Union composition. At most one list is expected to be populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionShape<C> {
    /// Matches one or more members.
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<C>,
    /// Matches one or more members (RAML style).
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<C>,
    /// Matches every member at once.
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<C>,
    /// Matches exactly one member.
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub xone: Vec<C>,
}

impl<C> Default for UnionShape<C> {
    fn default() -> Self {
        Self {
            any_of: Vec::new(),
            or: Vec::new(),
            and: Vec::new(),
            xone: Vec::new(),
        }
    }
}

/// How the members of a union combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnionMode {
    /// `anyOf`
    AnyOf,
    /// `xone`
    Xone,
    /// `or`
    Or,
    /// `and`
    And,
}

impl UnionMode {
    /// `and` unions combine members instead of choosing one.
    pub fn is_combined(self) -> bool {
        self == UnionMode::And
    }
}

impl<C> UnionShape<C> {
    /// Member list for one mode.
    pub fn members(&self, mode: UnionMode) -> &[C] {
        match mode {
            UnionMode::AnyOf => &self.any_of,
            UnionMode::Xone => &self.xone,
            UnionMode::Or => &self.or,
            UnionMode::And => &self.and,
        }
    }

    /// The populated member list used for interpretation
    /// (priority `anyOf` > `xone` > `or` > `and`).
    pub fn branches(&self) -> Option<(UnionMode, &[C])> {
        [UnionMode::AnyOf, UnionMode::Xone, UnionMode::Or, UnionMode::And]
            .into_iter()
            .map(|mode| (mode, self.members(mode)))
            .find(|(_, members)| !members.is_empty())
    }

    /// True when no member list is populated.
    pub fn is_empty(&self) -> bool {
        self.branches().is_none()
    }
}

/// File upload shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileShape {
    /// Accepted mime patterns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<String>,
    /// Minimum size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Format modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Opaque foreign schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaShape {
    /// Raw schema text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Media type of the raw text, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// An authored or synthesized example.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Example name, if the author gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Literal text of the example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Already parsed structure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_value: Option<JsonValue>,
    /// Media type `value` is written in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Example {
    /// True when the example carries non-empty text or a non-null structure.
    pub fn has_value(&self) -> bool {
        let has_text = self.value.as_deref().is_some_and(|v| !v.trim().is_empty());
        let has_structure = self.structured_value.as_ref().is_some_and(|v| !v.is_null());
        has_text || has_structure
    }
}

/// Pointer to a shape inside a graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeRef {
    /// Named reference into `declarations` or `references`.
    Ref {
        /// Target id.
        #[serde(rename = "$ref")]
        target: String,
    },
    /// Inline definition.
    Inline(Box<ShapeDef>),
}

impl ShapeRef {
    /// Builds a named reference.
    pub fn to(target: impl Into<String>) -> Self {
        ShapeRef::Ref {
            target: target.into(),
        }
    }
}

impl From<ShapeDef> for ShapeRef {
    fn from(def: ShapeDef) -> Self {
        ShapeRef::Inline(Box::new(def))
    }
}

/// Input shape definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDef {
    /// Shared metadata.
    #[serde(flatten)]
    pub meta: ShapeMeta,
    /// Variant payload with unresolved children.
    #[serde(flatten)]
    pub kind: ShapeKind<ShapeRef>,
}

impl ShapeDef {
    /// Creates a definition with default metadata.
    pub fn new(kind: ShapeKind<ShapeRef>) -> Self {
        Self {
            meta: ShapeMeta::default(),
            kind,
        }
    }

    /// Sets the type name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.meta.name = Some(name.into());
        self
    }
}

/// Resolved shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Shared metadata. `id` is always set on resolved shapes.
    #[serde(flatten)]
    pub meta: ShapeMeta,
    /// Variant payload with resolved children.
    #[serde(flatten)]
    pub kind: ShapeKind<Shape>,
}

impl Shape {
    /// Creates a shape with the given id.
    pub fn new(id: impl Into<String>, kind: ShapeKind<Shape>) -> Self {
        Self {
            meta: ShapeMeta {
                id: id.into(),
                ..ShapeMeta::default()
            },
            kind,
        }
    }

    /// Sets the type name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.meta.name = Some(name.into());
        self
    }

    /// Identity key.
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    /// Type name, if any.
    pub fn name(&self) -> Option<&str> {
        self.meta.name.as_deref()
    }

    /// Whether this is a cycle terminal.
    pub fn is_recursive(&self) -> bool {
        matches!(self.kind, ShapeKind::Recursive)
    }

    /// Scalar payload, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&ScalarShape> {
        match &self.kind {
            ShapeKind::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Node payload, if this is a node.
    pub fn as_node(&self) -> Option<&NodeShape<Shape>> {
        match &self.kind {
            ShapeKind::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Union payload, if this is a union.
    pub fn as_union(&self) -> Option<&UnionShape<Shape>> {
        match &self.kind {
            ShapeKind::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Author examples that carry a usable value.
    pub fn usable_examples(&self) -> impl Iterator<Item = &Example> {
        self.meta.examples.iter().filter(|e| e.has_value())
    }
}
