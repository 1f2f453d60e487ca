#![deny(missing_docs)]

//! # OpenAPI Normalization
//!
//! Rewrites schema spellings that have several equivalent forms into one, so
//! lowering only has to understand a single form:
//!
//! - Boolean schemas: `true` becomes `{}` (any value), `false` becomes
//!   `{ "not": {} }` (no value).
//! - `nullable` / `x-nullable`: added to a `type` list, or wrapped as
//!   `anyOf: [schema, { type: null }]` when no `type` is declared.
//! - `const`: becomes a one-value `enum`, inferring `type` when missing.

use serde_json::{json, Map, Value};

/// Keywords holding a single subschema.
const SINGLE_SCHEMA_KEYWORDS: &[&str] = &[
    "items",
    "not",
    "contains",
    "propertyNames",
    "if",
    "then",
    "else",
    "additionalProperties",
    "unevaluatedProperties",
    "unevaluatedItems",
];

/// Keywords holding a list of subschemas.
const SCHEMA_LIST_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf", "prefixItems"];

/// Keywords holding a name → subschema map.
const SCHEMA_MAP_KEYWORDS: &[&str] = &["properties", "patternProperties", "dependentSchemas"];

/// Applies every rewrite to each schema under `components/schemas`.
pub(crate) fn normalize_component_schemas(document: &mut Value) {
    let Some(schemas) = document
        .get_mut("components")
        .and_then(|c| c.get_mut("schemas"))
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    for schema in schemas.values_mut() {
        normalize_schema(schema);
    }
}

/// Applies every rewrite to one schema and its subschemas.
pub(crate) fn normalize_schema(schema: &mut Value) {
    if let Value::Bool(flag) = schema {
        *schema = bool_schema_replacement(*flag);
        return;
    }
    let Value::Object(map) = schema else {
        return;
    };

    for_each_subschema(map, normalize_schema);
    normalize_const(map);
    if let Some(wrapped) = apply_nullable_flag(map) {
        *schema = wrapped;
    }
}

fn for_each_subschema(map: &mut Map<String, Value>, visit: fn(&mut Value)) {
    for (key, value) in map.iter_mut() {
        let key = key.as_str();
        if SINGLE_SCHEMA_KEYWORDS.contains(&key) {
            // `additionalProperties: false` is a flag, not a schema.
            if value.is_boolean() && (key.starts_with("additional") || key.starts_with("unevaluated")) {
                continue;
            }
            visit(value);
        } else if SCHEMA_LIST_KEYWORDS.contains(&key) {
            if let Some(items) = value.as_array_mut() {
                items.iter_mut().for_each(visit);
            }
        } else if SCHEMA_MAP_KEYWORDS.contains(&key) {
            if let Some(entries) = value.as_object_mut() {
                entries.values_mut().for_each(visit);
            }
        }
    }
}

fn bool_schema_replacement(flag: bool) -> Value {
    if flag {
        Value::Object(Map::new())
    } else {
        json!({ "not": {} })
    }
}

fn normalize_const(map: &mut Map<String, Value>) {
    let Some(const_val) = map.remove("const") else {
        return;
    };
    if !map.contains_key("type") {
        if let Some(type_name) = infer_schema_type(&const_val) {
            map.insert("type".to_string(), Value::String(type_name.to_string()));
        }
    }
    map.entry("enum")
        .or_insert_with(|| Value::Array(vec![const_val]));
}

fn infer_schema_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::String(_) => Some("string"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(num) if num.is_i64() || num.is_u64() => Some("integer"),
        Value::Number(_) => Some("number"),
        Value::Array(_) => Some("array"),
        Value::Object(_) => Some("object"),
        Value::Null => Some("null"),
    }
}

/// Consumes `nullable` flags. Returns a replacement schema when the flag
/// cannot be folded into `type`.
fn apply_nullable_flag(map: &mut Map<String, Value>) -> Option<Value> {
    let flagged = |key: &str| map.get(key).and_then(Value::as_bool).unwrap_or(false);
    let nullable = flagged("nullable") || flagged("x-nullable");
    map.remove("nullable");
    map.remove("x-nullable");
    if !nullable {
        return None;
    }

    let Some(type_val) = map.get_mut("type") else {
        let original = Value::Object(map.clone());
        return Some(json!({ "anyOf": [original, { "type": "null" }] }));
    };
    match type_val {
        Value::String(type_name) if type_name != "null" => {
            let list = vec![Value::String(type_name.clone()), Value::String("null".into())];
            *type_val = Value::Array(list);
        }
        Value::Array(types) if !types.iter().any(|t| t.as_str() == Some("null")) => {
            types.push(Value::String("null".to_string()));
        }
        _ => {}
    }
    None
}
