//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::VeneerConfig;
use std::path::Path;

/// Loads and validates a `veneer.toml` configuration from a project directory.
///
/// Reads `<project_dir>/veneer.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<VeneerConfig, ConfigError> {
    let config_path = project_dir.join("veneer.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `veneer.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<VeneerConfig, ConfigError> {
    let config: VeneerConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and non-empty.
fn validate_config(config: &VeneerConfig) -> Result<(), ConfigError> {
    if config.coordinate.distribution_version.is_empty() {
        return Err(ConfigError::MissingField(
            "coordinate.distribution_version".to_string(),
        ));
    }
    if config.remote.version_index_url.is_empty() {
        return Err(ConfigError::MissingField(
            "remote.version_index_url".to_string(),
        ));
    }
    if config.remote.mappings_bundle_url.is_empty() {
        return Err(ConfigError::MissingField(
            "remote.mappings_bundle_url".to_string(),
        ));
    }
    for (field, command) in [
        ("tools.merge", &config.tools.merge),
        ("tools.remap", &config.tools.remap),
        ("tools.abstract", &config.tools.abstractor),
        ("tools.verify", &config.tools.verify),
    ] {
        if command.trim().is_empty() {
            return Err(ConfigError::MissingField(field.to_string()));
        }
    }
    Ok(())
}
