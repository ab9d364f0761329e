// Configuration validation
//
// Validates that paths are present and the two output destinations are
// distinct before any file is touched.

use crate::PipelineConfig;
use anyhow::{bail, Result};
use tracing::warn;

pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    if config.input.path.is_empty() {
        bail!("input.path must not be empty");
    }

    if config.output.clean_path.is_empty() {
        bail!("output.clean_path must not be empty");
    }

    if config.output.rejected_path.is_empty() {
        bail!("output.rejected_path must not be empty");
    }

    if config.output.clean_path == config.output.rejected_path {
        bail!(
            "output.clean_path and output.rejected_path must differ (both are '{}')",
            config.output.clean_path
        );
    }

    if !config.input.path.ends_with(".parquet") {
        warn!(
            path = %config.input.path,
            "input.path does not end in .parquet; the reader expects Parquet data"
        );
    }

    Ok(())
}
