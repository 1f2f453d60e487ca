#![deny(missing_docs)]

//! # Configuration
//!
//! Finds and loads the optional TOML configuration file.
//!
//! Search order:
//! 1. Explicit `--config` path (must exist).
//! 2. `shapedoc.toml` in the working directory.
//! 3. Built-in defaults.
//!
//! ```toml
//! default_media_type = "application/yaml"
//!
//! [synthesis]
//! renderExamples = true
//! renderOptional = false
//! referenceTime = "2024-01-31T12:00:00Z"
//! ```

use crate::error::{CliError, CliResult};
use log::{debug, info};
use serde::Deserialize;
use shapedoc_core::SynthesisOptions;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "shapedoc.toml";

/// Media type used when neither the file nor the command line names one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Example synthesis options.
    pub synthesis: SynthesisOptions,
    /// Media type for `example` when `--media-type` is absent.
    pub default_media_type: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            synthesis: SynthesisOptions::default(),
            default_media_type: DEFAULT_MEDIA_TYPE.to_string(),
        }
    }
}

/// Loads configuration following the search order above.
pub fn load_config(explicit_path: Option<&Path>) -> CliResult<CliConfig> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    debug!("No configuration file found, using default configuration");
    Ok(CliConfig::default())
}

fn load_config_file(path: &Path) -> CliResult<CliConfig> {
    if !path.exists() {
        return Err(CliError::Config(format!(
            "Missing configuration file: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| CliError::Config(format!("Failed to parse TOML configuration: {}", e)))
}
