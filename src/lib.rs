// orders-etl - single-pass batch pipeline over an orders dataset
//
// Load Parquet, derive features, count rule violations, partition into
// clean and rejected record sets, write CSV + Parquet. The transformation
// logic itself lives in orders-etl-core; this crate wires it to config,
// logging, and the filesystem.

pub mod init;
pub mod pipeline;

pub use pipeline::{run, PipelineSummary};
