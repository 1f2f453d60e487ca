#![deny(missing_docs)]

//! # Example Command
//!
//! Synthesizes the example payload of the root shape for a media type.

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::input::InputArgs;
use log::debug;
use shapedoc_core::{synthesize, synthesize_value, MediaType, SelectionRegistry};

/// Arguments for the example command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExampleArgs {
    /// Graph and root shape.
    #[command(flatten)]
    pub input: InputArgs,

    /// Media type to encode the example in. Defaults to the configured one.
    #[clap(long)]
    pub media_type: Option<String>,

    /// Preselected union branch as `union-id=branch-id`. May be repeated.
    #[clap(long = "select", value_name = "UNION=BRANCH")]
    pub selections: Vec<String>,

    /// Include optional properties without authored values.
    #[clap(long)]
    pub optional: bool,

    /// Ignore author examples and always synthesize.
    #[clap(long)]
    pub no_examples: bool,
}

/// Parses `--select` values into a registry.
fn seed_registry(selections: &[String]) -> CliResult<SelectionRegistry> {
    let mut registry = SelectionRegistry::new();
    for entry in selections {
        let (union_id, branch_id) = entry.split_once('=').ok_or_else(|| {
            CliError::General(format!(
                "Invalid selection '{}', expected UNION=BRANCH",
                entry
            ))
        })?;
        registry.insert(union_id.trim(), branch_id.trim());
    }
    Ok(registry)
}

/// Builds the example text.
pub fn render(args: &ExampleArgs, config: &CliConfig) -> CliResult<String> {
    let shape = args.input.resolve_root()?;
    let media_type = args
        .media_type
        .as_deref()
        .unwrap_or(&config.default_media_type);

    let mut options = config.synthesis.clone();
    options.render_optional |= args.optional;
    if args.no_examples {
        options.render_examples = false;
    }

    let mut registry = seed_registry(&args.selections)?;
    if let Some(example) = synthesize(&shape, media_type, &mut registry, &options) {
        debug!(selections = registry.len(); "Example synthesized");
        return example
            .value
            .ok_or_else(|| CliError::General("Example has no text value".to_string()));
    }

    // Scalars have no payload of their own; show their leaf value.
    let value = synthesize_value(&shape, &mut registry, &options).ok_or_else(|| {
        CliError::General(format!("Shape '{}' produces no example", shape.id()))
    })?;
    Ok(MediaType::parse(media_type).encode(&value, shape.name()))
}

/// Executes the example command.
pub fn execute(args: &ExampleArgs, config: &CliConfig) -> CliResult<()> {
    println!("{}", render(args, config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::fixtures;

    fn args(dir: &tempfile::TempDir, root: &str) -> ExampleArgs {
        ExampleArgs {
            input: InputArgs {
                graph: fixtures::write(dir, "graph.yaml", fixtures::GRAPH),
                root: root.into(),
                openapi: false,
            },
            media_type: None,
            selections: Vec::new(),
            optional: false,
            no_examples: false,
        }
    }

    #[test]
    fn test_default_branch_and_required_only() {
        let dir = tempfile::tempdir().unwrap();
        let text = render(&args(&dir, "Pet"), &CliConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "fido", "owner": { "email": "" } })
        );
    }

    #[test]
    fn test_selection_and_optional_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(&dir, "Pet");
        args.selections = vec!["Owner=Owner/anyOf/1".to_string()];
        args.optional = true;
        let text = render(&args, &CliConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "fido", "tag": "", "owner": { "vat": 0 } })
        );
    }

    #[test]
    fn test_media_type_from_config_and_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            default_media_type: "application/yaml".to_string(),
            ..CliConfig::default()
        };
        let text = render(&args(&dir, "Pet"), &config).unwrap();
        assert!(text.starts_with("name: fido"));

        let mut xml = args(&dir, "Pet");
        xml.media_type = Some("application/xml".to_string());
        let text = render(&xml, &config).unwrap();
        assert!(text.starts_with("<Pet>"));
    }

    #[test]
    fn test_scalar_root_prints_leaf() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(render(&args(&dir, "Id"), &CliConfig::default()).unwrap(), "0");
    }

    #[test]
    fn test_bad_selection_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(&dir, "Pet");
        args.selections = vec!["Owner".to_string()];
        assert!(render(&args, &CliConfig::default()).is_err());
    }
}
