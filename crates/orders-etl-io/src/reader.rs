// Parquet dataset reader
//
// Reads every row group into memory and concatenates to one RecordBatch.
// This pipeline is a single-pass batch job over a dataset that fits in
// memory; no streaming reader is needed.

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

use crate::error::{EtlIoError, Result};

/// Read a Parquet file into a single RecordBatch with the file's own schema.
///
/// An empty file yields an empty batch, not an error. Column projection and
/// type normalization are left to the caller.
pub fn read_parquet(path: impl AsRef<Path>) -> Result<RecordBatch> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| EtlIoError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parquet::write_parquet;
    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn sample_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("order_id", DataType::Int64, true),
            Field::new("product", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![Some(1), Some(2)])) as ArrayRef,
                Arc::new(StringArray::from(vec![Some("monitor"), None])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn round_trips_a_batch_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.parquet");

        let batch = sample_batch();
        write_parquet(&path, &batch).unwrap();

        let read_back = read_parquet(&path).unwrap();
        assert_eq!(read_back.num_rows(), 2);
        assert_eq!(read_back.schema(), batch.schema());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = read_parquet("/nonexistent/orders.parquet").unwrap_err();
        assert!(matches!(err, EtlIoError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/orders.parquet"));
    }
}
