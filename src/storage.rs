//! Parquet persistence for Arrow tables.
//!
//! Tables are written with the Arrow schema embedded in the file metadata,
//! so column names, order, nullability and types (including the UTC
//! timezone of timestamp columns) come back unchanged on read.

use std::fs::File;
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::Result;

/// Reads a whole Parquet file into a single table.
pub fn read_parquet(path: &Path) -> Result<RecordBatch> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;

    debug!(
        "read {} rows in {} batch(es) from {}",
        batch.num_rows(),
        batches.len(),
        path.display()
    );
    Ok(batch)
}

/// Writes a table to a Parquet file, replacing any existing file.
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    debug!("wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}
