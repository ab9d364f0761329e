// Pipeline orchestration
//
// load -> normalize -> derive -> validate -> partition -> write.
// Counts are computed once and carried in the summary; the logs are
// observability only, never a machine-readable contract.

use anyhow::{Context, Result};
use orders_etl_config::PipelineConfig;
use orders_etl_core::{process_orders, schema, ValidationReport};
use tracing::{error, info, warn};

/// Row counts and validation results from one pipeline run.
#[derive(Debug)]
pub struct PipelineSummary {
    pub input_rows: usize,
    pub derived_rows: usize,
    pub clean_rows: usize,
    pub rejected_rows: usize,
    pub report: ValidationReport,
}

/// Execute the full pipeline described by `config`.
///
/// A load failure is logged here and returned as an error without touching
/// either output destination. Later failures propagate as-is; a failed write
/// may leave a partially overwritten destination (no cleanup, no retries).
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    info!(path = %config.input.path, "loading orders dataset");
    let raw = match orders_etl_io::read_parquet(&config.input.path) {
        Ok(batch) => batch,
        Err(err) => {
            error!(error = %err, path = %config.input.path, "failed to load input data");
            // Outputs are untouched; the caller maps this to a non-zero exit
            return Err(err).context("loading input dataset");
        }
    };
    info!(rows = raw.num_rows(), "loaded input dataset");

    let normalized = schema::normalize(&raw).context("normalizing input schema")?;
    let outcome = process_orders(&normalized).context("transforming orders")?;

    if outcome.malformed_addresses > 0 {
        warn!(
            rows = outcome.malformed_addresses,
            "addresses with fewer than two tokens; purchase_state left null"
        );
    }
    info!(
        night_dropped = outcome.night_dropped,
        tv_dropped = outcome.tv_dropped,
        "data cleaning and feature engineering completed"
    );

    for (rule, count) in outcome.report.counts() {
        info!(rule, count, "validation check");
    }

    let summary = PipelineSummary {
        input_rows: outcome.input_rows,
        derived_rows: outcome.derived_rows(),
        clean_rows: outcome.clean.num_rows(),
        rejected_rows: outcome.rejected.num_rows(),
        report: outcome.report,
    };
    info!(
        total = summary.derived_rows,
        clean = summary.clean_rows,
        rejected = summary.rejected_rows,
        "partitioned records"
    );

    info!(path = %config.output.clean_path, "writing clean records");
    orders_etl_io::write_csv(&config.output.clean_path, &outcome.clean)
        .context("writing clean records")?;

    info!(path = %config.output.rejected_path, "writing rejected records");
    orders_etl_io::write_parquet(&config.output.rejected_path, &outcome.rejected)
        .context("writing rejected records")?;

    info!("pipeline execution completed successfully");
    Ok(summary)
}
