#![deny(missing_docs)]

//! # Query Parameter Flattening
//!
//! Turns a (possibly nested) query-string shape into the ordered list of
//! atomic parameters shown in documentation and used to build sample URLs.
//!
//! Only node properties derive `required` from `minCount`; every other leaf
//! parameter is optional.

use crate::error::AppError;
use crate::shape::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamBinding {
    /// `?name=value`
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Path template variable.
    Uri,
}

impl ParamBinding {
    /// Lower-case keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamBinding::Query => "query",
            ParamBinding::Header => "header",
            ParamBinding::Cookie => "cookie",
            ParamBinding::Uri => "uri",
        }
    }
}

impl fmt::Display for ParamBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamBinding {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(ParamBinding::Query),
            "header" => Ok(ParamBinding::Header),
            "cookie" => Ok(ParamBinding::Cookie),
            "uri" | "path" => Ok(ParamBinding::Uri),
            other => Err(AppError::General(format!(
                "Unknown parameter binding '{}'",
                other
            ))),
        }
    }
}

/// A flattened, atomic parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationParameter<'a> {
    /// Where the parameter goes.
    pub binding: ParamBinding,
    /// Id of the property or shape the parameter came from.
    pub param_id: String,
    /// Parameter name.
    pub name: String,
    /// Effective value shape. `None` when the property's range is missing.
    pub schema: Option<&'a Shape>,
    /// Whether the parameter must be sent.
    pub required: bool,
    /// Caller supplied origin tag, copied onto every parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Flattens `shape` into parameters for `binding`.
///
/// - Scalar, file, nil, tuple and raw schema shapes give one optional parameter.
/// - Nodes give one parameter per effective property (own then inherited).
/// - Arrays of nodes expand to the node's fields; other arrays are one
///   parameter.
/// - `and` unions concatenate every member; alternative unions flatten their
///   first branch only.
/// - Recursive terminals contribute nothing.
pub fn flatten_parameters<'a>(
    shape: &'a Shape,
    binding: ParamBinding,
    source: Option<&str>,
) -> Vec<OperationParameter<'a>> {
    let mut out = Vec::new();
    collect(shape, binding, source, &mut out);
    out
}

fn collect<'a>(
    shape: &'a Shape,
    binding: ParamBinding,
    source: Option<&str>,
    out: &mut Vec<OperationParameter<'a>>,
) {
    match &shape.kind {
        ShapeKind::Node(node) => {
            out.extend(node.effective_properties().map(|prop| OperationParameter {
                binding,
                param_id: prop.id.clone(),
                name: prop.name.clone(),
                schema: prop.range.as_ref(),
                required: prop.is_required(),
                source: source.map(str::to_string),
            }));
        }
        ShapeKind::Array(array) => match array.items.as_deref() {
            Some(items) if items.as_node().is_some() => collect(items, binding, source, out),
            _ => out.push(leaf(shape, binding, source)),
        },
        ShapeKind::Union(union) => {
            let Some((mode, members)) = union.branches() else {
                return;
            };
            if mode.is_combined() {
                for member in members {
                    collect(member, binding, source, out);
                }
            } else if let Some(first) = members.first() {
                collect(first, binding, source, out);
            }
        }
        ShapeKind::Recursive => {}
        ShapeKind::Scalar(_)
        | ShapeKind::File(_)
        | ShapeKind::Nil
        | ShapeKind::Tuple(_)
        | ShapeKind::Schema(_) => out.push(leaf(shape, binding, source)),
    }
}

fn leaf<'a>(shape: &'a Shape, binding: ParamBinding, source: Option<&str>) -> OperationParameter<'a> {
    OperationParameter {
        binding,
        param_id: shape.id().to_string(),
        name: shape
            .meta
            .display_name
            .as_deref()
            .or(shape.name())
            .unwrap_or_default()
            .to_string(),
        schema: Some(shape),
        required: false,
        source: source.map(str::to_string),
    }
}
