//! Conversion between [`ChatRecord`]s and Arrow tables.
//!
//! A chat table has the four [`ChatColumn`]s in their declared order:
//! three `Utf8` columns and a nanosecond UTC timestamp column.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, StringArray, StringBuilder, TimestampNanosecondArray,
    TimestampNanosecondBuilder,
};
use arrow::datatypes::{
    DataType, Field, Schema as ArrowSchema, SchemaRef, TimestampNanosecondType,
};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::DateTime;

use crate::ChatRecord;
use crate::error::{Result, SchemaError};
use crate::schema::{ChatColumn, ColumnSet, DType, Schema, UTC};

/// Arrow schema of a table built from [`ChatRecord`]s.
pub fn chat_arrow_schema() -> SchemaRef {
    let fields: Vec<Field> = ChatColumn::all()
        .iter()
        .map(|column| {
            let data_type = match column {
                ChatColumn::Timestamp => DType::Timestamp.arrow_type(),
                _ => DType::String.arrow_type(),
            };
            Field::new(column.name(), data_type, false)
        })
        .collect();
    Arc::new(ArrowSchema::new(fields))
}

/// Assembles records into a table with the [`ChatColumn`] layout.
pub fn records_to_batch(records: &[ChatRecord]) -> Result<RecordBatch> {
    let rows = records.len();
    let mut chat_names =
        StringBuilder::with_capacity(rows, text_len(records, ChatRecord::chat_name));
    let mut timestamps = TimestampNanosecondBuilder::with_capacity(rows).with_timezone(UTC);
    let mut authors = StringBuilder::with_capacity(rows, text_len(records, ChatRecord::author));
    let mut messages = StringBuilder::with_capacity(rows, text_len(records, ChatRecord::message));

    for record in records {
        let nanos = record.timestamp.timestamp_nanos_opt().ok_or_else(|| {
            ArrowError::InvalidArgumentError(format!(
                "timestamp {} does not fit in nanoseconds",
                record.timestamp
            ))
        })?;

        chat_names.append_value(&record.chat_name);
        timestamps.append_value(nanos);
        authors.append_value(&record.author);
        messages.append_value(&record.message);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(chat_names.finish()),
        Arc::new(timestamps.finish()),
        Arc::new(authors.finish()),
        Arc::new(messages.finish()),
    ];

    Ok(RecordBatch::try_new(chat_arrow_schema(), columns)?)
}

/// Reads records back out of a chat-shaped table.
///
/// The table must satisfy [`Schema::chat`]; columns are looked up by name,
/// so their order does not matter. Null cells are rejected.
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<ChatRecord>> {
    Schema::chat().validate(batch)?;

    let chat_names = string_column(batch, ChatColumn::ChatName)?;
    let timestamps = timestamp_column(batch, ChatColumn::Timestamp)?;
    let authors = string_column(batch, ChatColumn::Author)?;
    let messages = string_column(batch, ChatColumn::Message)?;

    for (column, array) in [
        (ChatColumn::ChatName, chat_names as &dyn Array),
        (ChatColumn::Timestamp, timestamps as &dyn Array),
        (ChatColumn::Author, authors as &dyn Array),
        (ChatColumn::Message, messages as &dyn Array),
    ] {
        if array.null_count() > 0 {
            return Err(ArrowError::InvalidArgumentError(format!(
                "column {column} contains {} null value(s)",
                array.null_count()
            ))
            .into());
        }
    }

    let records = (0..batch.num_rows())
        .map(|row| {
            ChatRecord::new(
                chat_names.value(row),
                DateTime::from_timestamp_nanos(timestamps.value(row)),
                authors.value(row),
                messages.value(row),
            )
        })
        .collect();

    Ok(records)
}

fn text_len(records: &[ChatRecord], field: fn(&ChatRecord) -> &str) -> usize {
    records.iter().map(|r| field(r).len()).sum()
}

fn column(batch: &RecordBatch, column: ChatColumn) -> std::result::Result<&ArrayRef, SchemaError> {
    batch
        .column_by_name(column.name())
        .ok_or_else(|| SchemaError::MissingColumn {
            column: column.name().to_string(),
        })
}

fn mismatch(column: ChatColumn, expected: DType, actual: &DataType) -> SchemaError {
    SchemaError::TypeMismatch {
        column: column.name().to_string(),
        expected,
        actual: actual.clone(),
    }
}

fn string_column(batch: &RecordBatch, name: ChatColumn) -> Result<&StringArray> {
    let array = column(batch, name)?;
    Ok(array
        .as_string_opt::<i32>()
        .ok_or_else(|| mismatch(name, DType::String, array.data_type()))?)
}

fn timestamp_column(batch: &RecordBatch, name: ChatColumn) -> Result<&TimestampNanosecondArray> {
    let array = column(batch, name)?;
    Ok(array
        .as_primitive_opt::<TimestampNanosecondType>()
        .ok_or_else(|| mismatch(name, DType::Timestamp, array.data_type()))?)
}
