#![deny(missing_docs)]

//! # Code-Sample Helpers
//!
//! Serializes flattened parameters into the pieces of a sample request:
//! path, query string, headers and cookies. Values come from example
//! synthesis, so they honour defaults, enums and union selections.

use crate::error::{AppError, AppResult};
use crate::example::{synthesize_value, SynthesisOptions};
use crate::resolver::{OperationParameter, ParamBinding};
use crate::view::SelectionRegistry;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value as JsonValue;
use url::form_urlencoded;
use url::Url;

/// Characters escaped inside a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Sample text for one parameter. Lists are joined with commas.
///
/// Returns `None` when the parameter has no schema or its schema synthesizes
/// to nothing.
pub fn parameter_value(
    param: &OperationParameter<'_>,
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> Option<String> {
    let value = synthesize_value(param.schema?, registry, options)?;
    Some(value_text(&value))
}

fn value_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// `(name, value)` pairs of every parameter with `binding`, in order.
fn bound_values(
    params: &[OperationParameter<'_>],
    binding: ParamBinding,
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|p| p.binding == binding && !p.name.is_empty())
        .filter_map(|p| Some((p.name.clone(), parameter_value(p, registry, options)?)))
        .collect()
}

/// `name=value&…` for query-bound parameters, form-urlencoded.
pub fn query_string(
    params: &[OperationParameter<'_>],
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in bound_values(params, ParamBinding::Query, registry, options) {
        serializer.append_pair(&name, &value);
    }
    serializer.finish()
}

/// Replaces `{name}` variables in a path template with uri-bound parameter
/// values. Unknown variables are left in place.
pub fn expand_path(
    template: &str,
    params: &[OperationParameter<'_>],
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> String {
    let mut path = template.to_string();
    for (name, value) in bound_values(params, ParamBinding::Uri, registry, options) {
        let encoded = utf8_percent_encode(&value, PATH_SEGMENT).to_string();
        path = path.replace(&format!("{{{name}}}"), &encoded);
    }
    path
}

/// Full sample URL: `base` with uri variables expanded and query parameters
/// appended.
pub fn url_with_query(
    base: &str,
    params: &[OperationParameter<'_>],
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> AppResult<String> {
    let expanded = expand_path(base, params, registry, options);
    let mut url = Url::parse(&expanded)
        .map_err(|e| AppError::Parse(format!("Invalid base URL '{}': {}", expanded, e)))?;

    let pairs = bound_values(params, ParamBinding::Query, registry, options);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url.to_string())
}

/// Header-bound parameters as ordered `(name, value)` pairs.
pub fn headers(
    params: &[OperationParameter<'_>],
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> Vec<(String, String)> {
    bound_values(params, ParamBinding::Header, registry, options)
}

/// Value of a `Cookie` header carrying every cookie-bound parameter.
pub fn cookie_header(
    params: &[OperationParameter<'_>],
    registry: &mut SelectionRegistry,
    options: &SynthesisOptions,
) -> Option<String> {
    let cookies = bound_values(params, ParamBinding::Cookie, registry, options);
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphDocument;
    use crate::resolver::flatten_parameters;
    use crate::shape::Shape;

    fn shape(name: &str) -> Shape {
        GraphDocument::from_yaml_str(
            r#"
declarations:
  Search:
    kind: node
    properties:
      - name: q
        minCount: 1
        range: { kind: scalar, dataType: string, defaultValueStr: "red shoes" }
      - name: sizes
        range:
          kind: array
          items: { kind: scalar, dataType: integer, values: [42] }
      - name: page
        range: { kind: scalar, dataType: integer }
  Ids:
    kind: node
    properties:
      - name: petId
        minCount: 1
        range: { kind: scalar, dataType: string, defaultValueStr: "a/b" }
"#,
        )
        .unwrap()
        .resolve(name)
        .unwrap()
    }

    #[test]
    fn test_parameter_values() {
        let search = shape("Search");
        let params = flatten_parameters(&search, ParamBinding::Query, None);
        let mut registry = SelectionRegistry::new();
        let options = SynthesisOptions::default();
        let values: Vec<Option<String>> = params
            .iter()
            .map(|p| parameter_value(p, &mut registry, &options))
            .collect();
        assert_eq!(
            values,
            vec![
                Some("red shoes".to_string()),
                Some("42".to_string()),
                Some("0".to_string())
            ]
        );
    }

    #[test]
    fn test_query_string_and_url() {
        let search = shape("Search");
        let params = flatten_parameters(&search, ParamBinding::Query, None);
        let mut registry = SelectionRegistry::new();
        let options = SynthesisOptions::default();
        assert_eq!(
            query_string(&params, &mut registry, &options),
            "q=red+shoes&sizes=42&page=0"
        );
        let url = url_with_query("https://api.example.com/search", &params, &mut registry, &options)
            .unwrap();
        assert_eq!(url, "https://api.example.com/search?q=red+shoes&sizes=42&page=0");
    }

    #[test]
    fn test_uri_header_and_cookie_bindings() {
        let ids = shape("Ids");
        let mut registry = SelectionRegistry::new();
        let options = SynthesisOptions::default();

        let uri = flatten_parameters(&ids, ParamBinding::Uri, None);
        let url = url_with_query("https://api.example.com/pets/{petId}", &uri, &mut registry, &options)
            .unwrap();
        assert_eq!(url, "https://api.example.com/pets/a%2Fb");

        let header = flatten_parameters(&ids, ParamBinding::Header, None);
        assert_eq!(
            headers(&header, &mut registry, &options),
            vec![("petId".to_string(), "a/b".to_string())]
        );
        assert!(cookie_header(&header, &mut registry, &options).is_none());

        let cookie = flatten_parameters(&ids, ParamBinding::Cookie, None);
        assert_eq!(
            cookie_header(&cookie, &mut registry, &options).as_deref(),
            Some("petId=a/b")
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut registry = SelectionRegistry::new();
        let err = url_with_query("not a url", &[], &mut registry, &SynthesisOptions::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
