#![deny(missing_docs)]

//! # Input Loading
//!
//! Shared arguments naming the graph file and the root shape.

use crate::error::{CliError, CliResult};
use shapedoc_core::{graph_from_openapi, GraphDocument, Shape};
use std::fs;
use std::path::PathBuf;

/// Graph file and root shape, shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Graph document (`.json`, `.yaml`, `.yml`).
    pub graph: PathBuf,

    /// Id of the shape to work on.
    pub root: String,

    /// Treat the input as an OpenAPI document and use its component schemas.
    #[clap(long)]
    pub openapi: bool,
}

impl InputArgs {
    /// Reads and decodes the input file.
    pub fn load(&self) -> CliResult<GraphDocument> {
        if !self.graph.exists() {
            return Err(CliError::General(format!(
                "Input file not found: {}",
                self.graph.display()
            )));
        }
        if self.openapi {
            let content = fs::read_to_string(&self.graph)?;
            return Ok(graph_from_openapi(&content)?);
        }
        Ok(GraphDocument::from_path(&self.graph)?)
    }

    /// Loads the document and resolves the root shape.
    pub fn resolve_root(&self) -> CliResult<Shape> {
        let graph = self.load()?;
        graph
            .resolve(&self.root)
            .ok_or_else(|| CliError::General(format!("Shape '{}' is not defined", self.root)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write(&dir, "graph.yaml", fixtures::GRAPH);
        let args = InputArgs {
            graph: path,
            root: "Pet".into(),
            openapi: false,
        };
        assert_eq!(args.resolve_root().unwrap().name(), Some("Pet"));
    }

    #[test]
    fn test_unknown_root_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write(&dir, "graph.yaml", fixtures::GRAPH);
        let unknown = InputArgs {
            graph: path,
            root: "Nope".into(),
            openapi: false,
        };
        assert!(matches!(unknown.resolve_root(), Err(CliError::General(_))));

        let missing = InputArgs {
            graph: dir.path().join("absent.yaml"),
            root: "Pet".into(),
            openapi: false,
        };
        assert!(missing.load().is_err());
    }

    #[test]
    fn test_openapi_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write(
            &dir,
            "openapi.yaml",
            "openapi: 3.1.0\ncomponents:\n  schemas:\n    Tag:\n      type: object\n      properties:\n        label: { type: string }\n",
        );
        let args = InputArgs {
            graph: path,
            root: "Tag".into(),
            openapi: true,
        };
        let shape = args.resolve_root().unwrap();
        assert_eq!(shape.as_node().unwrap().properties[0].name, "label");
    }
}
