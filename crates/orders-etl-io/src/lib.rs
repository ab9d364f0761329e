// orders-etl-io - File I/O for the orders pipeline
//
// Reads the source Parquet dataset and writes the two output partitions:
// clean records as a single CSV file with header, rejected records as
// Parquet. All writes are overwrite-mode; prior content is replaced.

pub mod csv;
pub mod error;
pub mod parquet;
pub mod reader;

pub use csv::write_csv;
pub use error::{EtlIoError, Result};
pub use parquet::write_parquet;
pub use reader::read_parquet;
