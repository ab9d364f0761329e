// Parquet writer for the rejected partition
//
// Snappy compression and dictionary encoding keep files small without
// pulling in heavier codec features.

use arrow::array::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{EtlIoError, Result};

pub fn writer_properties() -> &'static WriterProperties {
    static PROPERTIES: OnceLock<WriterProperties> = OnceLock::new();
    PROPERTIES.get_or_init(|| {
        WriterProperties::builder()
            .set_dictionary_enabled(true)
            .set_statistics_enabled(EnabledStatistics::Page)
            .set_compression(Compression::SNAPPY)
            .set_max_row_group_size(32 * 1024)
            .build()
    })
}

/// Write a RecordBatch as Parquet into an arbitrary `Write` sink.
pub fn write_parquet_into<W>(batch: &RecordBatch, writer: &mut W) -> Result<()>
where
    W: Write + Send,
{
    let props = writer_properties().clone();
    let mut arrow_writer = ArrowWriter::try_new(writer, batch.schema(), Some(props))?;
    arrow_writer.write(batch)?;
    arrow_writer.close()?;
    Ok(())
}

/// Write a RecordBatch to a Parquet file, replacing any existing file.
///
/// Parent directories are created as needed.
pub fn write_parquet(path: impl AsRef<Path>, batch: &RecordBatch) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| EtlIoError::Create {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut file = File::create(path).map_err(|source| EtlIoError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_parquet_into(batch, &mut file)
}
