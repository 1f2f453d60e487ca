#![deny(missing_docs)]

//! # Example Synthesis
//!
//! Produces a representative example payload for a resolved shape.
//!
//! Author examples are preferred when `renderExamples` is set. Otherwise a
//! default structure is built recursively from the shape and encoded for the
//! requested media type:
//!
//! - Scalars contribute their default, first enum value, example or zero value.
//! - Nodes become objects. Optional properties without an authored hint are
//!   left out unless `renderOptional` is set.
//! - Unions synthesize their active branch; `and` unions merge every member.
//! - Recursive terminals and missing shapes contribute nothing, so the field
//!   is absent.

/// Media-type encoders.
pub mod encode;

/// Scalar leaf values.
pub mod scalars;

pub use encode::MediaType;

use crate::resolver::{is_scalar_shape, select_branch, UnionSelection};
use crate::shape::{Example, Shape, ShapeKind};
use crate::view::SelectionRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Knobs for example synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SynthesisOptions {
    /// Prefer author examples over synthesized ones.
    pub render_examples: bool,
    /// Include optional properties that carry no authored hint.
    pub render_optional: bool,
    /// Instant used for date and time placeholders. Defaults to now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            render_examples: true,
            render_optional: false,
            reference_time: None,
        }
    }
}

/// Builds the example shown for `shape` in `media_type`.
///
/// Returns `None` for scalar shapes (rendered inline by the caller) and for
/// shapes that synthesize to nothing.
pub fn synthesize(
    shape: &Shape,
    media_type: &str,
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> Option<Example> {
    if is_scalar_shape(shape) {
        return None;
    }

    let media = MediaType::parse(media_type);

    if options.render_examples {
        if let Some(authored) = authored_example(shape) {
            return Some(complete_example(authored, &media, shape));
        }
    }

    let value = synthesize_value(shape, registry, options)?;
    Some(Example {
        name: None,
        display_name: None,
        value: Some(media.encode(&value, shape.name())),
        structured_value: Some(value),
        media_type: Some(media_type.to_string()),
    })
}

/// First usable author example of the shape, then of its ancestors.
fn authored_example(shape: &Shape) -> Option<&Example> {
    if let Some(own) = shape.usable_examples().next() {
        return Some(own);
    }
    let node = shape.as_node()?;
    node.ancestors()
        .into_iter()
        .find_map(|ancestor| ancestor.usable_examples().next())
}

/// Clones an author example, filling in the text form when only a
/// structure was authored.
fn complete_example(authored: &Example, media: &MediaType, shape: &Shape) -> Example {
    let mut example = authored.clone();
    let has_text = example
        .value
        .as_deref()
        .is_some_and(|v| !v.trim().is_empty());
    if !has_text {
        if let Some(structured) = &example.structured_value {
            example.value = Some(media.encode(structured, shape.name()));
        }
    }
    example
}

/// Synthesizes the structured value of any shape, scalars included.
///
/// `None` means the shape contributes nothing (recursive terminal, empty
/// union).
pub fn synthesize_value(
    shape: &Shape,
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> Option<JsonValue> {
    match &shape.kind {
        ShapeKind::Scalar(scalar) => Some(scalars::scalar_value(shape, scalar, options)),
        ShapeKind::Nil => Some(JsonValue::Null),
        ShapeKind::File(_) => Some(JsonValue::String(String::new())),
        ShapeKind::Schema(schema) => Some(JsonValue::String(
            schema.raw.clone().unwrap_or_default(),
        )),
        ShapeKind::Recursive => None,
        ShapeKind::Node(node) => {
            if let Some(nested) = nested_example(shape, options) {
                return Some(nested);
            }
            let mut object = Map::new();
            for prop in node.effective_properties() {
                // First declaration of a name wins.
                if object.contains_key(&prop.name) {
                    continue;
                }
                let Some(range) = prop.range.as_ref() else {
                    continue;
                };
                if !prop.is_required() && !options.render_optional && !has_hint(range) {
                    continue;
                }
                if let Some(value) = synthesize_value(range, registry, options) {
                    object.insert(prop.name.clone(), value);
                }
            }
            Some(JsonValue::Object(object))
        }
        ShapeKind::Array(array) => {
            let entries = array
                .items
                .as_deref()
                .and_then(|items| synthesize_value(items, registry, options))
                .into_iter()
                .collect();
            Some(JsonValue::Array(entries))
        }
        ShapeKind::Tuple(tuple) => Some(JsonValue::Array(
            tuple
                .items
                .iter()
                .map(|slot| {
                    slot.as_ref()
                        .and_then(|slot| synthesize_value(slot, registry, options))
                        .unwrap_or(JsonValue::Null)
                })
                .collect(),
        )),
        ShapeKind::Union(_) => match select_branch(shape, registry)? {
            UnionSelection::Alternative { active, .. } => {
                synthesize_value(active, registry, options)
            }
            UnionSelection::Combined { members } => members
                .iter()
                .filter_map(|member| synthesize_value(member.shape, registry, options))
                .reduce(|mut merged, next| {
                    merge_first_wins(&mut merged, next);
                    merged
                }),
        },
    }
}

/// Structured author example on a nested non-scalar shape.
fn nested_example(shape: &Shape, options: &SynthesisOptions) -> Option<JsonValue> {
    if !options.render_examples {
        return None;
    }
    let example = shape.usable_examples().next()?;
    match (&example.structured_value, &example.value) {
        (Some(structured), _) if !structured.is_null() => Some(structured.clone()),
        (_, Some(text)) => serde_json::from_str(text).ok(),
        _ => None,
    }
}

/// Whether a shape carries an authored value worth showing even when its
/// property is optional.
fn has_hint(shape: &Shape) -> bool {
    let authored = shape
        .as_scalar()
        .is_some_and(scalars::has_authored_value);
    authored || shape.usable_examples().next().is_some()
}

/// Deep-merges `next` into `merged`; keys already present are kept.
fn merge_first_wins(merged: &mut JsonValue, next: JsonValue) {
    let (JsonValue::Object(target), JsonValue::Object(source)) = (merged, next) else {
        return;
    };
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) => merge_first_wins(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphDocument;
    use chrono::TimeZone;
    use serde_json::json;

    fn options() -> SynthesisOptions {
        SynthesisOptions {
            reference_time: Some(Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()),
            ..SynthesisOptions::default()
        }
    }

    fn graph(yaml: &str) -> GraphDocument {
        GraphDocument::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_scalar_root_is_not_synthesized() {
        let doc = graph("declarations:\n  Id: { kind: scalar, dataType: string }\n");
        let shape = doc.resolve("Id").unwrap();
        let mut registry = SelectionRegistry::new();
        assert!(synthesize(&shape, "application/json", &mut registry, &options()).is_none());
        // As a leaf it still has a value.
        assert_eq!(
            synthesize_value(&shape, &mut registry, &options()),
            Some(json!(""))
        );
    }

    #[test]
    fn test_recursive_property_is_omitted() {
        let doc = graph(r#"
declarations:
  RelatedTo:
    kind: node
    name: RelatedTo
    properties:
      - name: id
        minCount: 1
        range: { kind: scalar, dataType: string }
      - name: related
        minCount: 1
        range: { $ref: RelatedTo }
"#);
        let shape = doc.resolve("RelatedTo").unwrap();
        let mut registry = SelectionRegistry::new();
        let example = synthesize(&shape, "application/json", &mut registry, &options()).unwrap();
        assert_eq!(example.structured_value, Some(json!({"id": ""})));
        assert_eq!(example.media_type.as_deref(), Some("application/json"));
        assert_eq!(example.value.as_deref(), Some("{\n  \"id\": \"\"\n}"));
    }

    #[test]
    fn test_optional_properties_need_a_hint() {
        let doc = graph(r#"
declarations:
  Pet:
    kind: node
    properties:
      - name: name
        minCount: 1
        range: { kind: scalar, dataType: string }
      - name: tag
        range: { kind: scalar, dataType: string }
      - name: kind
        range: { kind: scalar, dataType: string, values: [dog, cat] }
      - name: ghost
        minCount: 1
        range: { $ref: Missing }
"#);
        let shape = doc.resolve("Pet").unwrap();
        let mut registry = SelectionRegistry::new();
        let value = synthesize_value(&shape, &mut registry, &options()).unwrap();
        assert_eq!(value, json!({"name": "", "kind": "dog"}));

        let all = SynthesisOptions {
            render_optional: true,
            ..options()
        };
        let value = synthesize_value(&shape, &mut registry, &all).unwrap();
        assert_eq!(value, json!({"name": "", "tag": "", "kind": "dog"}));
    }

    #[test]
    fn test_and_union_merges_first_writer_wins() {
        let doc = graph(r#"
declarations:
  NewPet:
    kind: node
    name: NewPet
    properties:
      - { name: name, minCount: 1, range: { kind: scalar, dataType: string } }
      - { name: tag, minCount: 1, range: { kind: scalar, dataType: string } }
  Error:
    kind: node
    name: Error
    properties:
      - { name: code, minCount: 1, range: { kind: scalar, dataType: integer } }
      - { name: message, minCount: 1, range: { kind: scalar, dataType: string } }
      - { name: name, minCount: 1, range: { kind: scalar, dataType: integer } }
  Mixed:
    kind: union
    and:
      - $ref: NewPet
      - $ref: Error
      - kind: node
        properties:
          - { name: id, minCount: 1, range: { kind: scalar, dataType: integer } }
          - { name: test, minCount: 1, range: { kind: scalar, dataType: boolean } }
"#);
        let shape = doc.resolve("Mixed").unwrap();
        let mut registry = SelectionRegistry::new();
        let example = synthesize(&shape, "application/json", &mut registry, &options()).unwrap();
        let value = example.structured_value.unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "tag", "code", "message", "id", "test"]);
        assert_eq!(value["name"], json!(""));
        assert_eq!(value["code"], json!(0));
        assert_eq!(value["test"], json!(false));
    }

    #[test]
    fn test_alternative_union_uses_registry() {
        let doc = graph(r#"
declarations:
  Cat:
    kind: node
    properties:
      - { name: meow, minCount: 1, range: { kind: scalar, dataType: boolean } }
  Dog:
    kind: node
    properties:
      - { name: bark, minCount: 1, range: { kind: scalar, dataType: boolean } }
  Pet:
    kind: union
    anyOf: [ { $ref: Cat }, { $ref: Dog } ]
"#);
        let shape = doc.resolve("Pet").unwrap();
        let mut registry = SelectionRegistry::new();
        let first = synthesize_value(&shape, &mut registry, &options()).unwrap();
        assert_eq!(first, json!({"meow": false}));
        assert_eq!(registry.get("Pet"), Some("Cat"));

        registry.insert("Pet", "Dog");
        let second = synthesize_value(&shape, &mut registry, &options()).unwrap();
        assert_eq!(second, json!({"bark": false}));
    }

    #[test]
    fn test_arrays_tuples_and_placeholders() {
        let doc = graph(r#"
declarations:
  Bag:
    kind: node
    properties:
      - { name: tags, minCount: 1, range: { kind: array, items: { kind: scalar, dataType: string } } }
      - { name: empty, minCount: 1, range: { kind: array } }
      - name: pair
        minCount: 1
        range: { kind: tuple, items: [ { $ref: Missing }, { kind: scalar, dataType: integer } ] }
      - { name: upload, minCount: 1, range: { kind: file } }
      - { name: raw, minCount: 1, range: { kind: schema } }
      - { name: nothing, minCount: 1, range: { kind: nil } }
"#);
        let shape = doc.resolve("Bag").unwrap();
        let mut registry = SelectionRegistry::new();
        let value = synthesize_value(&shape, &mut registry, &options()).unwrap();
        assert_eq!(
            value,
            json!({
                "tags": [""],
                "empty": [],
                "pair": [null, 0],
                "upload": "",
                "raw": "",
                "nothing": null
            })
        );
    }

    #[test]
    fn test_author_example_preferred_and_not_mutated() {
        let doc = graph(r#"
declarations:
  Base:
    kind: node
    name: Base
    examples:
      - name: sample
        structuredValue: { id: 7 }
    properties:
      - { name: id, minCount: 1, range: { kind: scalar, dataType: integer } }
  Child:
    kind: node
    name: Child
    inherits: [ { $ref: Base } ]
"#);
        let shape = doc.resolve("Child").unwrap();
        let mut registry = SelectionRegistry::new();
        let example = synthesize(&shape, "application/json", &mut registry, &options()).unwrap();
        assert_eq!(example.name.as_deref(), Some("sample"));
        assert_eq!(example.value.as_deref(), Some("{\n  \"id\": 7\n}"));

        let base = doc.resolve("Base").unwrap();
        assert!(base.meta.examples[0].value.is_none());

        let synthesized = SynthesisOptions {
            render_examples: false,
            ..options()
        };
        let example = synthesize(&shape, "application/json", &mut registry, &synthesized).unwrap();
        assert_eq!(example.structured_value, Some(json!({"id": 0})));
    }

    #[test]
    fn test_combined_members_supply_partial_examples() {
        let doc = graph(r#"
declarations:
  A:
    kind: node
    name: A
    examples:
      - structuredValue: { a: authored }
    properties:
      - { name: a, minCount: 1, range: { kind: scalar, dataType: string } }
  B:
    kind: node
    name: B
    properties:
      - { name: b, minCount: 1, range: { kind: scalar, dataType: integer } }
  Both:
    kind: union
    and: [ { $ref: A }, { $ref: B } ]
  Derived:
    kind: node
    name: Derived
    inherits: [ { $ref: Both } ]
    properties:
      - { name: x, minCount: 1, range: { kind: scalar, dataType: boolean } }
"#);
        let mut registry = SelectionRegistry::new();

        // The union itself merges the member example with the synthesized rest.
        let both = doc.resolve("Both").unwrap();
        let example = synthesize(&both, "application/json", &mut registry, &options()).unwrap();
        assert_eq!(example.structured_value, Some(json!({"a": "authored", "b": 0})));

        // A node inheriting the union finds the member example as an ancestor's.
        let derived = doc.resolve("Derived").unwrap();
        let example = synthesize(&derived, "application/json", &mut registry, &options()).unwrap();
        assert_eq!(example.structured_value, Some(json!({"a": "authored"})));

        let synthesized = SynthesisOptions {
            render_examples: false,
            ..options()
        };
        let value = synthesize_value(&derived, &mut registry, &synthesized).unwrap();
        assert_eq!(value, json!({"x": false, "a": "", "b": 0}));
    }

    #[test]
    fn test_xml_example_uses_shape_name() {
        let doc = graph(r#"
declarations:
  Pet:
    kind: node
    name: Pet
    properties:
      - { name: name, minCount: 1, range: { kind: scalar, dataType: string, defaultValueStr: fido } }
"#);
        let shape = doc.resolve("Pet").unwrap();
        let mut registry = SelectionRegistry::new();
        let example = synthesize(&shape, "application/xml", &mut registry, &options()).unwrap();
        assert_eq!(example.value.as_deref(), Some("<Pet>\n  <name>fido</name>\n</Pet>"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: SynthesisOptions = serde_json::from_value(json!({"renderOptional": true})).unwrap();
        assert!(opts.render_examples);
        assert!(opts.render_optional);
        assert!(opts.reference_time.is_none());
    }
}
