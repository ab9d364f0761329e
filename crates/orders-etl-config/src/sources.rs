// Configuration source loading
//
// Priority order:
// 1. Environment variables (ORDERS_ETL_* prefix)
// 2. Config file path from ORDERS_ETL_CONFIG
// 3. Inline config content from ORDERS_ETL_CONFIG_CONTENT
// 4. Default config file (./orders-etl.toml)
// 5. Built-in defaults

use crate::{LogFormat, PipelineConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

/// Source of environment variables, abstracted for tests.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Load configuration from the standard sources and the process environment.
pub fn load_config() -> Result<PipelineConfig> {
    let mut config = load_from_sources()?.unwrap_or_default();
    apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a specific file path (for the --config flag),
/// then apply environment overrides as usual.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let mut config: PipelineConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn load_from_sources() -> Result<Option<PipelineConfig>> {
    if let Ok(path) = env::var("ORDERS_ETL_CONFIG") {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {path}"))?;
        let config: PipelineConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {path}"))?;
        return Ok(Some(config));
    }

    if let Ok(content) = env::var("ORDERS_ETL_CONFIG_CONTENT") {
        let config: PipelineConfig = toml::from_str(&content)
            .context("failed to parse inline config from ORDERS_ETL_CONFIG_CONTENT")?;
        return Ok(Some(config));
    }

    let default_path = "./orders-etl.toml";
    if Path::new(default_path).exists() {
        let content = std::fs::read_to_string(default_path)
            .with_context(|| format!("failed to read config file: {default_path}"))?;
        let config: PipelineConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {default_path}"))?;
        return Ok(Some(config));
    }

    Ok(None)
}

/// Apply ORDERS_ETL_* environment overrides on top of `config`.
pub fn apply_env_overrides(config: &mut PipelineConfig, env: &dyn EnvSource) -> Result<()> {
    if let Some(path) = env.var("ORDERS_ETL_INPUT_PATH") {
        config.input.path = path;
    }
    if let Some(path) = env.var("ORDERS_ETL_CLEAN_PATH") {
        config.output.clean_path = path;
    }
    if let Some(path) = env.var("ORDERS_ETL_REJECTED_PATH") {
        config.output.rejected_path = path;
    }
    if let Some(level) = env.var("ORDERS_ETL_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = env.var("ORDERS_ETL_LOG_FORMAT") {
        config.logging.format = format
            .parse::<LogFormat>()
            .context("invalid ORDERS_ETL_LOG_FORMAT")?;
    }
    Ok(())
}
