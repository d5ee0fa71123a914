//! Schema-validated chat tables.
//!
//! [`ChatDataset`] wraps an Arrow [`RecordBatch`] that has passed
//! [`Schema`] validation. Every loader ends in the same step: validate the
//! table and reorder its columns to the schema's order. Nothing is returned
//! on failure; there are no partially loaded datasets.
//!
//! # Example
//!
//! ```rust
//! use chatframe::prelude::*;
//!
//! let schema = Schema::chat();
//! let dataset = ChatDataset::load_from_str(
//!     &schema,
//!     "2/5/20, 8:38 PM - Author 1: Hello world\n\
//!      2/5/20, 8:39 PM - Author 2: I like balloons too!\n",
//!     "test_chat",
//!     &TxtConfig::default(),
//! )?;
//!
//! assert_eq!(dataset.num_rows(), 2);
//! assert_eq!(dataset.to_records()?[1].message(), "I like balloons too!");
//! # Ok::<(), chatframe::ChatframeError>(())
//! ```

use std::path::Path;

use arrow::record_batch::RecordBatch;
use log::debug;

use crate::ChatRecord;
use crate::config::TxtConfig;
use crate::error::Result;
use crate::parser::TxtParser;
use crate::schema::Schema;
use crate::table::{batch_to_records, records_to_batch};

/// A table validated against a [`Schema`].
///
/// Immutable once loaded. Columns are always in the schema's declared order.
#[derive(Debug, Clone)]
pub struct ChatDataset {
    data: RecordBatch,
    schema: Schema,
}

impl ChatDataset {
    /// Loads a chat export text file with default parsing options.
    ///
    /// The chat name of every row is the file's base name without its
    /// extension. Fails with a malformed-input error if the file holds no
    /// message lines, and with a schema violation if the parsed table does
    /// not fit `schema`.
    pub fn load_from_txt(schema: &Schema, path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_txt_with_config(schema, path, &TxtConfig::default())
    }

    /// Loads a chat export text file with custom parsing options.
    pub fn load_from_txt_with_config(
        schema: &Schema,
        path: impl AsRef<Path>,
        config: &TxtConfig,
    ) -> Result<Self> {
        let records = TxtParser::with_config(config.clone()).parse(path.as_ref())?;
        Self::from_records(schema, &records)
    }

    /// Loads chat export text held in memory.
    pub fn load_from_str(
        schema: &Schema,
        content: &str,
        chat_name: &str,
        config: &TxtConfig,
    ) -> Result<Self> {
        let records = TxtParser::with_config(config.clone()).parse_str(content, chat_name)?;
        Self::from_records(schema, &records)
    }

    /// Loads a Parquet file as-is and validates it.
    #[cfg(feature = "parquet")]
    pub fn load_from_parquet(schema: &Schema, path: impl AsRef<Path>) -> Result<Self> {
        let batch = crate::storage::read_parquet(path.as_ref())?;
        Self::load_from_record_batch(schema, batch)
    }

    /// Wraps an in-memory table after validating it.
    pub fn load_from_record_batch(schema: &Schema, batch: RecordBatch) -> Result<Self> {
        let data = schema.conform(batch)?;
        debug!(
            "validated table with {} rows and {} columns",
            data.num_rows(),
            data.num_columns()
        );
        Ok(Self {
            data,
            schema: schema.clone(),
        })
    }

    /// Builds a dataset from parsed records.
    pub fn from_records(schema: &Schema, records: &[ChatRecord]) -> Result<Self> {
        let batch = records_to_batch(records)?;
        Self::load_from_record_batch(schema, batch)
    }

    /// Writes the table to a Parquet file.
    #[cfg(feature = "parquet")]
    pub fn save_to_parquet(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::storage::write_parquet(path.as_ref(), &self.data)
    }

    /// Returns the validated table.
    pub fn data(&self) -> &RecordBatch {
        &self.data
    }

    /// Consumes the dataset, returning the table.
    pub fn into_data(self) -> RecordBatch {
        self.data
    }

    /// Returns the schema this dataset was validated against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.data.num_rows()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.num_rows() == 0
    }

    /// Reads the rows back as [`ChatRecord`]s.
    ///
    /// Only works for tables shaped like [`Schema::chat`].
    pub fn to_records(&self) -> Result<Vec<ChatRecord>> {
        batch_to_records(&self.data)
    }
}

/// Datasets are equal when their schemas match and every column holds the
/// same values. Field nullability flags and table metadata are ignored.
impl PartialEq for ChatDataset {
    fn eq(&self, other: &Self) -> bool {
        if self.schema != other.schema || self.data.num_rows() != other.data.num_rows() {
            return false;
        }

        self.schema.columns().iter().all(|name| {
            match (
                self.data.column_by_name(name),
                other.data.column_by_name(name),
            ) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            }
        })
    }
}
