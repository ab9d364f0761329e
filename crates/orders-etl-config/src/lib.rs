// orders-etl-config - Pipeline configuration
//
// Supports configuration from multiple sources:
// 1. Environment variables (ORDERS_ETL_* prefix, highest priority)
// 2. Config file path from ORDERS_ETL_CONFIG
// 3. Config file contents from ORDERS_ETL_CONFIG_CONTENT
// 4. Default config file location (./orders-etl.toml)
// 5. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};

mod sources;
mod validation;

pub use sources::{load_config, load_from_file_path, EnvSource, StdEnvSource};

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        validation::validate_config(self)
    }
}

/// Source dataset location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "data/orders.parquet".to_string(),
        }
    }
}

/// Destinations for the two partitions. Both are overwritten on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub clean_path: String,
    pub rejected_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clean_path: "out/orders_clean.csv".to_string(),
            rejected_path: "out/orders_rejected.parquet".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown log format '{other}', expected 'text' or 'json'"),
        }
    }
}
