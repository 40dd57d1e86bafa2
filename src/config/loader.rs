//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LoBalancerConfig;
use crate::config::validation::ValidationError;

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

/// Read a TOML configuration file. Semantic validation is not run here.
///
/// Required values (port, VIP) may be absent here because the command line
/// can still supply them; semantic checks run after the merge through
/// [`crate::config::validate_config`].
pub fn load_config(path: &Path) -> Result<LoBalancerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: LoBalancerConfig = toml::from_str(&content)?;
    Ok(config)
}
