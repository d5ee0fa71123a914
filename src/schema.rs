//! Declarative table schemas.
//!
//! A [`Schema`] names the columns a dataset must carry, in order, and
//! optionally pins the runtime type of some of them. Columns without a
//! declared [`DType`] may hold any Arrow type.
//!
//! Column names usually come from a closed enum implementing [`ColumnSet`];
//! [`ChatColumn`] is the set produced by the text loader.
//!
//! # Example
//!
//! ```rust
//! use chatframe::schema::{ChatColumn, DType, Schema};
//!
//! let schema = Schema::from_column_set([(ChatColumn::Timestamp, DType::Timestamp)]);
//! assert_eq!(schema.columns(), ["CHAT_NAME", "TIMESTAMP", "AUTHOR", "MESSAGE"]);
//! assert_eq!(schema.dtype("TIMESTAMP"), Some(DType::Timestamp));
//! assert_eq!(schema.dtype("AUTHOR"), None);
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Time zone attached to every timestamp column.
pub const UTC: &str = "UTC";

/// A closed, ordered set of column identifiers.
///
/// Implemented by plain enums; `all()` fixes the column order.
pub trait ColumnSet: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every member of the set, in column order.
    fn all() -> &'static [Self];

    /// The column name used in tables.
    fn name(self) -> &'static str;
}

/// Columns produced by parsing a chat export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatColumn {
    /// Chat name, derived from the export's file name
    ChatName,
    /// Message time, UTC
    Timestamp,
    /// Display name of the sender
    Author,
    /// Message text
    Message,
}

impl ColumnSet for ChatColumn {
    fn all() -> &'static [Self] {
        &[
            ChatColumn::ChatName,
            ChatColumn::Timestamp,
            ChatColumn::Author,
            ChatColumn::Message,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            ChatColumn::ChatName => "CHAT_NAME",
            ChatColumn::Timestamp => "TIMESTAMP",
            ChatColumn::Author => "AUTHOR",
            ChatColumn::Message => "MESSAGE",
        }
    }
}

impl fmt::Display for ChatColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic column types a schema can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    /// Nanosecond timestamp in UTC
    Timestamp,
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
    /// Boolean
    Boolean,
}

impl DType {
    /// The Arrow type a column must have to satisfy this dtype.
    pub fn arrow_type(self) -> DataType {
        match self {
            DType::Timestamp => DataType::Timestamp(TimeUnit::Nanosecond, Some(UTC.into())),
            DType::String => DataType::Utf8,
            DType::Integer => DataType::Int64,
            DType::Float => DataType::Float64,
            DType::Boolean => DataType::Boolean,
        }
    }

    /// Returns `true` if `data_type` is exactly this dtype's Arrow type.
    pub fn matches(self, data_type: &DataType) -> bool {
        *data_type == self.arrow_type()
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Timestamp => "timestamp[ns, UTC]",
            DType::String => "string",
            DType::Integer => "int64",
            DType::Float => "float64",
            DType::Boolean => "bool",
        };
        f.write_str(name)
    }
}

/// Expected columns of a table and the required type of some of them.
///
/// Immutable once built. Construction checks that every typed column is one
/// of the declared columns and that no column is declared twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct Schema {
    columns: Vec<String>,
    columns_to_dtypes: BTreeMap<String, DType>,
}

#[derive(Deserialize)]
struct RawSchema {
    columns: Vec<String>,
    #[serde(default)]
    columns_to_dtypes: BTreeMap<String, DType>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = SchemaError;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        Schema::new(raw.columns, raw.columns_to_dtypes)
    }
}

impl Schema {
    /// Builds a schema from column names and a partial name-to-dtype map.
    pub fn new<C, S, D, K>(columns: C, columns_to_dtypes: D) -> Result<Self, SchemaError>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = (K, DType)>,
        K: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }

        let mut dtypes = BTreeMap::new();
        for (column, dtype) in columns_to_dtypes {
            let column = column.into();
            if !seen.contains(column.as_str()) {
                return Err(SchemaError::UnknownDtypeColumn { column });
            }
            dtypes.insert(column, dtype);
        }

        Ok(Self {
            columns,
            columns_to_dtypes: dtypes,
        })
    }

    /// Builds a schema over every member of `C`, typing the listed columns.
    pub fn from_column_set<C: ColumnSet>(dtypes: impl IntoIterator<Item = (C, DType)>) -> Self {
        Self {
            columns: C::all().iter().map(|c| c.name().to_string()).collect(),
            columns_to_dtypes: dtypes
                .into_iter()
                .map(|(c, dtype)| (c.name().to_string(), dtype))
                .collect(),
        }
    }

    /// The schema of a parsed chat export: all four [`ChatColumn`]s, typed.
    pub fn chat() -> Self {
        Self::from_column_set([
            (ChatColumn::ChatName, DType::String),
            (ChatColumn::Timestamp, DType::Timestamp),
            (ChatColumn::Author, DType::String),
            (ChatColumn::Message, DType::String),
        ])
    }

    /// Column names in declared order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The typed subset of the columns.
    pub fn columns_to_dtypes(&self) -> &BTreeMap<String, DType> {
        &self.columns_to_dtypes
    }

    /// Required dtype of `column`, or `None` if it is unconstrained or unknown.
    pub fn dtype(&self, column: &str) -> Option<DType> {
        self.columns_to_dtypes.get(column).copied()
    }

    /// Returns `true` if the schema declares `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Checks that `batch` has exactly this schema's columns and types.
    ///
    /// Column order is not checked here; see [`Schema::conform`].
    pub fn validate(&self, batch: &RecordBatch) -> Result<(), SchemaError> {
        self.column_indices(batch).map(|_| ())
    }

    /// Returns `true` if [`Schema::validate`] would succeed.
    pub fn is_valid(&self, batch: &RecordBatch) -> bool {
        self.validate(batch).is_ok()
    }

    /// Validates `batch` and reorders its columns to the declared order.
    pub fn conform(&self, batch: RecordBatch) -> crate::Result<RecordBatch> {
        let indices = self.column_indices(&batch)?;
        if indices.iter().enumerate().all(|(pos, &idx)| pos == idx) {
            return Ok(batch);
        }
        Ok(batch.project(&indices)?)
    }

    /// Position of each declared column in `batch`, in declared order.
    fn column_indices(&self, batch: &RecordBatch) -> Result<Vec<usize>, SchemaError> {
        let arrow_schema = batch.schema_ref();
        let fields = arrow_schema.fields();

        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            if by_name.insert(field.name().as_str(), idx).is_some() {
                return Err(SchemaError::DuplicateColumn {
                    column: field.name().clone(),
                });
            }
        }

        let mut indices = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let Some(&idx) = by_name.get(column.as_str()) else {
                return Err(SchemaError::MissingColumn {
                    column: column.clone(),
                });
            };

            if let Some(&expected) = self.columns_to_dtypes.get(column) {
                let actual = fields[idx].data_type();
                if !expected.matches(actual) {
                    return Err(SchemaError::TypeMismatch {
                        column: column.clone(),
                        expected,
                        actual: actual.clone(),
                    });
                }
            }

            indices.push(idx);
        }

        if let Some(extra) = fields.iter().find(|f| !self.contains(f.name())) {
            return Err(SchemaError::ExtraColumn {
                column: extra.name().clone(),
            });
        }

        Ok(indices)
    }
}
