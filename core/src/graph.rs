#![deny(missing_docs)]

//! # Graph Document
//!
//! The input side of the engine: two lookup tables of shape definitions.
//!
//! - `declarations`: types declared locally by the document.
//! - `references`: types pulled in from external fragments or libraries.
//!
//! Documents can be decoded from JSON or YAML. Declaration keys double as
//! shape ids unless a definition carries an explicit `id`.

use crate::error::{AppError, AppResult};
use crate::resolver::ShapeNormalizer;
use crate::shape::{Shape, ShapeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declared and referenced shape definitions keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Locally declared types.
    #[serde(default)]
    pub declarations: IndexMap<String, ShapeRef>,
    /// Externally referenced types.
    #[serde(default)]
    pub references: IndexMap<String, ShapeRef>,
}

impl GraphDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a document from JSON text.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Parse(format!("Failed to parse graph JSON: {}", e)))
    }

    /// Decodes a document from YAML text.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Parse(format!("Failed to parse graph YAML: {}", e)))
    }

    /// Reads a document from disk. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Adds a local declaration.
    pub fn declare(&mut self, id: impl Into<String>, shape: impl Into<ShapeRef>) -> &mut Self {
        self.declarations.insert(id.into(), shape.into());
        self
    }

    /// Adds an external reference.
    pub fn reference(&mut self, id: impl Into<String>, shape: impl Into<ShapeRef>) -> &mut Self {
        self.references.insert(id.into(), shape.into());
        self
    }

    /// Looks an id up in declarations first, then references.
    pub fn lookup(&self, id: &str) -> Option<&ShapeRef> {
        self.declarations
            .get(id)
            .or_else(|| self.references.get(id))
    }

    /// A normalizer over this document's tables.
    pub fn normalizer(&self) -> ShapeNormalizer<'_> {
        ShapeNormalizer::new(&self.declarations, &self.references)
    }

    /// Resolves a declared or referenced shape by id.
    pub fn resolve(&self, id: &str) -> Option<Shape> {
        self.normalizer().resolve(&ShapeRef::to(id))
    }
}
