//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::LinkerConfig;
use std::path::Path;

/// Name of the configuration file inside a project directory.
pub const CONFIG_FILE: &str = "permlink.toml";

/// Loads and validates a `permlink.toml` configuration from a project directory.
///
/// Reads `<project_dir>/permlink.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<LinkerConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `permlink.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<LinkerConfig, ConfigError> {
    let config: LinkerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and output names cannot collide.
fn validate_config(config: &LinkerConfig) -> Result<(), ConfigError> {
    if config.module.name.is_empty() {
        return Err(ConfigError::MissingField("module.name".to_string()));
    }
    if config.output.descriptor.is_empty() {
        return Err(ConfigError::MissingField("output.descriptor".to_string()));
    }
    if config.output.descriptor.ends_with(".appcache") {
        return Err(ConfigError::ValidationError(format!(
            "output.descriptor '{}' would collide with a permutation manifest",
            config.output.descriptor
        )));
    }
    Ok(())
}
