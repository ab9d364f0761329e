// CSV writer for the clean partition
//
// One consolidated comma-separated file with a header row, replacing any
// existing file at the destination.

use arrow::array::RecordBatch;
use arrow::csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

use crate::error::{EtlIoError, Result};

/// Write a RecordBatch as a single CSV file with header, overwriting any
/// existing file. A zero-row batch still produces the header line.
pub fn write_csv(path: impl AsRef<Path>, batch: &RecordBatch) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| EtlIoError::Create {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| EtlIoError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn sample_batch(rows: Vec<(Option<i64>, Option<&str>, Option<f64>)>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("order_id", DataType::Int64, true),
            Field::new("product", DataType::Utf8, true),
            Field::new("price_each", DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(
                    rows.iter().map(|r| r.0).collect::<Vec<_>>(),
                )) as ArrayRef,
                Arc::new(StringArray::from(
                    rows.iter().map(|r| r.1).collect::<Vec<_>>(),
                )),
                Arc::new(Float64Array::from(
                    rows.iter().map(|r| r.2).collect::<Vec<_>>(),
                )),
            ],
        )
        .unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");

        let batch = sample_batch(vec![
            (Some(1), Some("monitor"), Some(149.99)),
            (Some(2), None, Some(9.5)),
        ]);
        write_csv(&path, &batch).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("order_id,product,price_each"));
        assert_eq!(lines.clone().count(), 2);
        assert!(content.contains("1,monitor,149.99"));
    }

    #[test]
    fn empty_batch_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");

        write_csv(&path, &sample_batch(vec![])).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "order_id,product,price_each");
    }

    #[test]
    fn overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");

        write_csv(
            &path,
            &sample_batch(vec![(Some(1), Some("a"), Some(1.0))]),
        )
        .unwrap();
        write_csv(&path, &sample_batch(vec![])).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1, "only the header should remain");
    }
}
