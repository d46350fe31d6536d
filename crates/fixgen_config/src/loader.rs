//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "fixgen.toml";

/// Loads and validates `fixgen.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// A default signal must have at least one bit and room for its binary point.
fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    let fixed = &config.fixed;
    if fixed.width == 0 {
        return Err(ConfigError::ValidationError(
            "fixed.width must be non-zero".to_string(),
        ));
    }
    if fixed.point >= fixed.width {
        return Err(ConfigError::ValidationError(format!(
            "fixed.point ({}) must be less than fixed.width ({})",
            fixed.point, fixed.width
        )));
    }
    Ok(())
}
