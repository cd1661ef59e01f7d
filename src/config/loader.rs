//! Configuration and site data loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ResolverConfig;
use crate::config::validation::{validate_config, validate_site_data, ValidationError};
use crate::store::SiteData;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate service configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ResolverConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ResolverConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse and validate a site data document.
pub fn parse_site_data(content: &str) -> Result<SiteData, ConfigError> {
    let data: SiteData = toml::from_str(content)?;

    validate_site_data(&data).map_err(ConfigError::Validation)?;

    Ok(data)
}

/// Load and validate a site data document from disk.
pub fn load_site_data(path: &Path) -> Result<SiteData, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_site_data(&content)
}
