#![deny(missing_docs)]

//! # Media-Type Encoding
//!
//! Serializes synthesized structures to the text form of a media type.
//! JSON, YAML, XML and form encoding are supported; anything else falls back
//! to pretty JSON.

use crate::error::{AppError, AppResult};
use log::warn;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value as JsonValue;
use std::fmt::Write as _;

/// Characters left untouched in `application/x-www-form-urlencoded` bodies.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Element name used for XML roots without a shape name.
const DEFAULT_XML_ROOT: &str = "root";

/// Element name used for entries of a top-level XML list.
const XML_LIST_ENTRY: &str = "item";

/// Encodings known to the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    /// `application/json`, `*+json`
    Json,
    /// `application/yaml`, `application/x-yaml`, `text/yaml`
    Yaml,
    /// `application/xml`, `text/xml`, `*+xml`
    Xml,
    /// `application/x-www-form-urlencoded`
    Form,
    /// Anything else, kept verbatim.
    Other(String),
}

impl MediaType {
    /// Classifies a media type string. Parameters (`; charset=utf-8`) are
    /// ignored and matching is case-insensitive.
    pub fn parse(media_type: &str) -> Self {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/json" => MediaType::Json,
            "application/yaml" | "application/x-yaml" | "text/yaml" | "text/x-yaml" => {
                MediaType::Yaml
            }
            "application/xml" | "text/xml" => MediaType::Xml,
            "application/x-www-form-urlencoded" => MediaType::Form,
            other if other.ends_with("+json") => MediaType::Json,
            other if other.ends_with("+xml") => MediaType::Xml,
            _ => MediaType::Other(media_type.trim().to_string()),
        }
    }

    /// Encodes `value`. `root_name` names the XML root element.
    pub fn try_encode(&self, value: &JsonValue, root_name: Option<&str>) -> AppResult<String> {
        match self {
            MediaType::Json => to_json(value),
            MediaType::Yaml => serde_yaml::to_string(value)
                .map_err(|e| AppError::Encode(format!("Failed to encode YAML: {}", e))),
            MediaType::Xml => Ok(to_xml(value, root_name.unwrap_or(DEFAULT_XML_ROOT))),
            MediaType::Form => to_form(value),
            MediaType::Other(name) => {
                warn!(media_type = name.as_str(); "Unsupported media type, encoding as JSON");
                to_json(value)
            }
        }
    }

    /// Like [`MediaType::try_encode`] but never fails: encoding errors fall
    /// back to compact JSON text.
    pub fn encode(&self, value: &JsonValue, root_name: Option<&str>) -> String {
        self.try_encode(value, root_name).unwrap_or_else(|err| {
            warn!(err:err; "Encoding failed, using plain JSON text");
            value.to_string()
        })
    }
}

fn to_json(value: &JsonValue) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Encode(format!("Failed to encode JSON: {}", e)))
}

fn to_form(value: &JsonValue) -> AppResult<String> {
    match value {
        JsonValue::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(key, v)| {
                    format!(
                        "{}={}",
                        utf8_percent_encode(key, FORM_VALUE),
                        utf8_percent_encode(&form_text(v), FORM_VALUE)
                    )
                })
                .collect();
            Ok(pairs.join("&"))
        }
        JsonValue::Array(_) => Err(AppError::Encode(
            "Form bodies must be objects, not lists".to_string(),
        )),
        other => Ok(utf8_percent_encode(&form_text(other), FORM_VALUE).to_string()),
    }
}

/// Text of a single form value. Nested structures are embedded as JSON.
fn form_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn to_xml(value: &JsonValue, root_name: &str) -> String {
    let mut out = String::new();
    let root = xml_name(root_name);
    match value {
        JsonValue::Array(entries) => {
            let _ = writeln!(out, "<{root}>");
            for entry in entries {
                write_element(&mut out, XML_LIST_ENTRY, entry, 1);
            }
            let _ = write!(out, "</{root}>");
        }
        other => {
            write_element(&mut out, &root, other, 0);
            out.truncate(out.trim_end().len());
        }
    }
    out
}

fn write_element(out: &mut String, name: &str, value: &JsonValue, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = xml_name(name);
    match value {
        JsonValue::Null => {
            let _ = writeln!(out, "{indent}<{name}/>");
        }
        JsonValue::Object(map) => {
            let _ = writeln!(out, "{indent}<{name}>");
            for (key, child) in map {
                write_element(out, key, child, depth + 1);
            }
            let _ = writeln!(out, "{indent}</{name}>");
        }
        // Lists repeat the element once per entry.
        JsonValue::Array(entries) => {
            for entry in entries {
                write_element(out, &name, entry, depth);
            }
        }
        JsonValue::String(s) => {
            let _ = writeln!(out, "{indent}<{name}>{}</{name}>", escape_xml(s));
        }
        other => {
            let _ = writeln!(out, "{indent}<{name}>{other}</{name}>");
        }
    }
}

/// Replaces characters that are not valid in XML element names.
fn xml_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_media_types() {
        assert_eq!(MediaType::parse("application/json"), MediaType::Json);
        assert_eq!(
            MediaType::parse("application/problem+json; charset=utf-8"),
            MediaType::Json
        );
        assert_eq!(MediaType::parse("text/yaml"), MediaType::Yaml);
        assert_eq!(MediaType::parse("application/atom+xml"), MediaType::Xml);
        assert_eq!(
            MediaType::parse("application/x-www-form-urlencoded"),
            MediaType::Form
        );
        assert_eq!(
            MediaType::parse("text/csv"),
            MediaType::Other("text/csv".to_string())
        );
    }

    #[test]
    fn test_json_is_pretty() {
        let text = MediaType::Json.encode(&json!({"id": 1}), None);
        assert_eq!(text, "{\n  \"id\": 1\n}");
    }

    #[test]
    fn test_yaml() {
        let text = MediaType::Yaml.encode(&json!({"name": "fido"}), None);
        assert_eq!(text.trim(), "name: fido");
    }

    #[test]
    fn test_xml_nested_and_repeated() {
        let value = json!({"name": "a<b", "tags": ["x", "y"], "owner": {"id": 1}, "gone": null});
        let text = MediaType::Xml.encode(&value, Some("Pet"));
        let expected = "<Pet>\n  <name>a&lt;b</name>\n  <tags>x</tags>\n  <tags>y</tags>\n  <owner>\n    <id>1</id>\n  </owner>\n  <gone/>\n</Pet>";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_xml_top_level_list_and_names() {
        let text = MediaType::Xml.encode(&json!([1, 2]), Some("1 list"));
        assert_eq!(text, "<_1_list>\n  <item>1</item>\n  <item>2</item>\n</_1_list>");
    }

    #[test]
    fn test_form_encoding() {
        let value = json!({"name": "fido dog", "age": 3, "meta": {"a": 1}});
        let text = MediaType::Form.encode(&value, None);
        assert_eq!(text, "name=fido%20dog&age=3&meta=%7B%22a%22%3A1%7D");
        assert!(MediaType::Form.try_encode(&json!([1]), None).is_err());
        // Lists fall back to compact JSON text.
        assert_eq!(MediaType::Form.encode(&json!([1]), None), "[1]");
    }

    #[test]
    fn test_unknown_media_type_falls_back_to_json() {
        let text = MediaType::parse("text/csv").encode(&json!({"id": 1}), None);
        assert_eq!(text, "{\n  \"id\": 1\n}");
    }
}
