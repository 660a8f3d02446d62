//! Configuration commands.

use crate::config::AgendaConfig;
use crate::error::{AppError, AppResult};

/// Dump the effective configuration to stdout.
pub fn dump(config: &AgendaConfig) -> AppResult<()> {
    println!("{}", render(config)?);
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &AgendaConfig) -> AppResult<()> {
    config.validate()?;
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> AppResult<()> {
    println!("config: {}", AgendaConfig::default_path().display());
    Ok(())
}

fn render(config: &AgendaConfig) -> AppResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| AppError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!(
        "# config.toml ({})\n{}",
        AgendaConfig::default_path().display(),
        toml_str
    ))
}
