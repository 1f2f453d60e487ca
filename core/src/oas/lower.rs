#![deny(missing_docs)]

//! # Schema Lowering
//!
//! Converts `components/schemas` of an OpenAPI 3.x document into graph
//! document declarations.
//!
//! The document is walked as raw JSON so that every keyword the engine cares
//! about survives, whatever OpenAPI version produced it.

use crate::error::{AppError, AppResult};
use crate::graph::GraphDocument;
use crate::oas::normalization::normalize_component_schemas;
use crate::oas::ref_utils::{component_name, SCHEMAS_SECTION};
use crate::shape::{
    ArrayShape, Example, FileShape, NodeShape, PropertyShape, ScalarShape, ShapeDef, ShapeKind,
    ShapeMeta, ShapeRef, TupleShape, UnionShape,
};
use log::{debug, info};
use serde_json::{Map, Value as JsonValue};

/// Parses an OpenAPI document (YAML or JSON text) and lowers its component
/// schemas into a graph document.
pub fn graph_from_openapi(text: &str) -> AppResult<GraphDocument> {
    let mut raw: JsonValue = serde_yaml::from_str(text)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI document: {}", e)))?;

    if raw.get("openapi").is_none() && raw.get("swagger").is_none() {
        return Err(AppError::Parse(
            "Document has no 'openapi' version field".to_string(),
        ));
    }

    normalize_component_schemas(&mut raw);

    let lowering = Lowering {
        self_uri: raw.get("$self").and_then(JsonValue::as_str),
    };

    let mut graph = GraphDocument::new();
    if let Some(schemas) = raw
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(JsonValue::as_object)
    {
        for (name, schema) in schemas {
            let mut def = match lowering.lower(schema) {
                ShapeRef::Inline(def) => *def,
                alias @ ShapeRef::Ref { .. } => {
                    graph.declare(name.as_str(), alias);
                    continue;
                }
            };
            def.meta.name.get_or_insert_with(|| name.clone());
            graph.declare(name.as_str(), def);
        }
    }

    info!(declarations = graph.declarations.len(); "Lowered OpenAPI component schemas");
    Ok(graph)
}

struct Lowering<'d> {
    self_uri: Option<&'d str>,
}

impl Lowering<'_> {
    fn lower(&self, schema: &JsonValue) -> ShapeRef {
        let Some(map) = schema.as_object() else {
            return ShapeDef::new(any_scalar()).into();
        };
        if let Some(target) = map.get("$ref").and_then(JsonValue::as_str) {
            return match component_name(target, self.self_uri, SCHEMAS_SECTION) {
                Some(name) => ShapeRef::to(name),
                None => {
                    debug!(reference = target; "Reference outside components/schemas kept as missing");
                    ShapeRef::to(target)
                }
            };
        }
        ShapeDef {
            meta: meta_of(map),
            kind: self.lower_kind(map),
        }
        .into()
    }

    fn lower_list(&self, schemas: &JsonValue) -> Vec<ShapeRef> {
        schemas
            .as_array()
            .map(|items| items.iter().map(|s| self.lower(s)).collect())
            .unwrap_or_default()
    }

    fn lower_kind(&self, map: &Map<String, JsonValue>) -> ShapeKind<ShapeRef> {
        if let Some(all_of) = map.get("allOf") {
            return self.lower_all_of(all_of);
        }
        if let Some(any_of) = map.get("anyOf") {
            return ShapeKind::Union(UnionShape {
                any_of: self.lower_list(any_of),
                ..UnionShape::default()
            });
        }
        if let Some(one_of) = map.get("oneOf") {
            return ShapeKind::Union(UnionShape {
                xone: self.lower_list(one_of),
                ..UnionShape::default()
            });
        }

        match map.get("type") {
            Some(JsonValue::String(type_name)) => self.lower_typed(map, type_name),
            Some(JsonValue::Array(types)) => self.lower_type_list(map, types),
            _ if map.contains_key("properties") => ShapeKind::Node(self.lower_node(map)),
            _ if map.contains_key("items") || map.contains_key("prefixItems") => {
                self.lower_typed(map, "array")
            }
            _ if map.contains_key("enum") => ShapeKind::Scalar(scalar_of(map, "string")),
            _ if map.len() == 1 && map.contains_key("not") => ShapeKind::Nil,
            _ => ShapeKind::Scalar(scalar_of(map, "any")),
        }
    }

    /// Inline last member with properties over named parents is inheritance;
    /// anything else is an `and` union.
    fn lower_all_of(&self, all_of: &JsonValue) -> ShapeKind<ShapeRef> {
        let mut members = self.lower_list(all_of);
        let parents_are_refs = members
            .iter()
            .rev()
            .skip(1)
            .all(|m| matches!(m, ShapeRef::Ref { .. }));

        if members.len() > 1 && parents_are_refs {
            if let Some(ShapeRef::Inline(own)) = members.last() {
                if let ShapeKind::Node(node) = &own.kind {
                    if !node.properties.is_empty() {
                        let mut node = node.clone();
                        members.pop();
                        node.inherits = members;
                        return ShapeKind::Node(node);
                    }
                }
            }
        }

        ShapeKind::Union(UnionShape {
            and: members,
            ..UnionShape::default()
        })
    }

    /// `type: [T, "null"]` becomes `anyOf: [T, nil]`.
    fn lower_type_list(
        &self,
        map: &Map<String, JsonValue>,
        types: &[JsonValue],
    ) -> ShapeKind<ShapeRef> {
        let names: Vec<&str> = types.iter().filter_map(JsonValue::as_str).collect();
        let concrete: Vec<&str> = names.iter().copied().filter(|t| *t != "null").collect();
        let nullable = concrete.len() != names.len();

        let mut members: Vec<ShapeRef> = concrete
            .iter()
            .map(|type_name| ShapeDef::new(self.lower_typed(map, type_name)).into())
            .collect();

        match (members.len(), nullable) {
            (0, true) => ShapeKind::Nil,
            (0, false) => ShapeKind::Scalar(scalar_of(map, "any")),
            (1, false) => self.lower_typed(map, concrete[0]),
            _ => {
                if nullable {
                    members.push(ShapeDef::new(ShapeKind::Nil).into());
                }
                ShapeKind::Union(UnionShape {
                    any_of: members,
                    ..UnionShape::default()
                })
            }
        }
    }

    fn lower_typed(&self, map: &Map<String, JsonValue>, type_name: &str) -> ShapeKind<ShapeRef> {
        match type_name {
            "object" => ShapeKind::Node(self.lower_node(map)),
            "array" => {
                if let Some(prefix) = map.get("prefixItems") {
                    return ShapeKind::Tuple(TupleShape {
                        items: self.lower_list(prefix).into_iter().map(Some).collect(),
                        unique_items: flag(map, "uniqueItems"),
                    });
                }
                ShapeKind::Array(ArrayShape {
                    items: map.get("items").map(|items| Box::new(self.lower(items))),
                    unique_items: flag(map, "uniqueItems"),
                    min_items: map.get("minItems").and_then(JsonValue::as_u64),
                    max_items: map.get("maxItems").and_then(JsonValue::as_u64),
                })
            }
            "null" => ShapeKind::Nil,
            "string" if string_field(map, "format").as_deref() == Some("binary") => {
                ShapeKind::File(FileShape {
                    file_types: string_field(map, "contentMediaType").into_iter().collect(),
                    min_length: map.get("minLength").and_then(JsonValue::as_u64),
                    max_length: map.get("maxLength").and_then(JsonValue::as_u64),
                    format: string_field(map, "format"),
                })
            }
            "string" => {
                let data_type = match string_field(map, "format").as_deref() {
                    Some("date") => "date",
                    Some("date-time") => "datetime",
                    Some("time") => "time",
                    _ => "string",
                };
                ShapeKind::Scalar(scalar_of(map, data_type))
            }
            other => ShapeKind::Scalar(scalar_of(map, other)),
        }
    }

    fn lower_node(&self, map: &Map<String, JsonValue>) -> NodeShape<ShapeRef> {
        let required: Vec<&str> = map
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();

        let properties = map
            .get("properties")
            .and_then(JsonValue::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, schema)| PropertyShape {
                        id: String::new(),
                        name: name.clone(),
                        display_name: schema
                            .get("title")
                            .and_then(JsonValue::as_str)
                            .map(str::to_string),
                        min_count: u32::from(required.contains(&name.as_str())),
                        range: Some(self.lower(schema)),
                    })
                    .collect()
            })
            .unwrap_or_default();

        NodeShape {
            properties,
            inherits: Vec::new(),
            min_properties: map.get("minProperties").and_then(JsonValue::as_u64),
            max_properties: map.get("maxProperties").and_then(JsonValue::as_u64),
        }
    }
}

fn any_scalar() -> ShapeKind<ShapeRef> {
    ShapeKind::Scalar(ScalarShape::of("any"))
}

fn meta_of(map: &Map<String, JsonValue>) -> ShapeMeta {
    let mut examples: Vec<Example> = map
        .get("examples")
        .and_then(JsonValue::as_array)
        .map(|values| values.iter().map(example_of).collect())
        .unwrap_or_default();
    if let Some(single) = map.get("example") {
        examples.push(example_of(single));
    }

    ShapeMeta {
        id: String::new(),
        name: None,
        display_name: string_field(map, "title"),
        description: string_field(map, "description"),
        read_only: flag(map, "readOnly"),
        write_only: flag(map, "writeOnly"),
        deprecated: flag(map, "deprecated"),
        examples,
    }
}

fn example_of(value: &JsonValue) -> Example {
    Example {
        structured_value: Some(value.clone()),
        ..Example::default()
    }
}

fn scalar_of(map: &Map<String, JsonValue>, data_type: &str) -> ScalarShape {
    let number = |key: &str| map.get(key).and_then(JsonValue::as_f64);
    let count = |key: &str| map.get(key).and_then(JsonValue::as_u64);
    ScalarShape {
        data_type: data_type.to_string(),
        format: string_field(map, "format"),
        pattern: string_field(map, "pattern"),
        minimum: number("minimum"),
        maximum: number("maximum"),
        min_length: count("minLength"),
        max_length: count("maxLength"),
        multiple_of: number("multipleOf"),
        default_value_str: map.get("default").map(|d| match d {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }),
        values: map
            .get("enum")
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default(),
    }
}

fn string_field(map: &Map<String, JsonValue>, key: &str) -> Option<String> {
    map.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn flag(map: &Map<String, JsonValue>, key: &str) -> bool {
    map.get(key).and_then(JsonValue::as_bool).unwrap_or(false)
}
