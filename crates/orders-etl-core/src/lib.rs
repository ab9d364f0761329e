// orders-etl-core - Pure order-record processing logic
//
// This crate contains the transformation logic for the orders pipeline:
// feature derivation, validation counts, and clean/rejected partitioning.
// No I/O, no side effects, deterministic for the same input.

pub mod columns;
pub mod derive;
pub mod error;
pub mod partition;
pub mod schema;
pub mod validate;

pub use derive::{derive_features, DeriveOutcome, TimeOfDay};
pub use error::CoreError;
pub use partition::{partition, Partitioned};
pub use schema::{derived_schema, derived_schema_arc, orders_schema, orders_schema_arc};
pub use validate::{validate_orders, ValidationReport};

use arrow::array::RecordBatch;

/// Result of running the full transformation over one batch of orders.
///
/// Carries the partitioned record sets plus everything the caller needs for
/// logging: filter counts from derivation and the validation report. Counts
/// are computed once here rather than re-derived from the batches.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub clean: RecordBatch,
    pub rejected: RecordBatch,
    pub report: ValidationReport,
    pub input_rows: usize,
    pub night_dropped: usize,
    pub tv_dropped: usize,
    pub malformed_addresses: usize,
}

impl ProcessOutcome {
    /// Rows that survived derivation (night and tv filters applied).
    pub fn derived_rows(&self) -> usize {
        self.clean.num_rows() + self.rejected.num_rows()
    }
}

/// Run derivation, validation, and partitioning over a batch of raw orders.
///
/// The input must match [`schema::orders_schema`]; use
/// [`schema::normalize`] first if the source file uses different but
/// castable column types.
pub fn process_orders(batch: &RecordBatch) -> Result<ProcessOutcome, CoreError> {
    let outcome = derive::derive_features(batch)?;
    let report = validate::validate_orders(&outcome.batch)?;
    let parts = partition::partition(&outcome.batch)?;

    Ok(ProcessOutcome {
        clean: parts.clean,
        rejected: parts.rejected,
        report,
        input_rows: outcome.input_rows,
        night_dropped: outcome.night_dropped,
        tv_dropped: outcome.tv_dropped,
        malformed_addresses: outcome.malformed_addresses,
    })
}
