//! Unified error types for chatframe.
//!
//! This module provides a single [`ChatframeError`] enum for every loader and
//! writer in the library, plus [`SchemaError`] for schema construction and
//! validation failures.
//!
//! # Error Classes
//!
//! - **Malformed input**: the text file is not shaped like a chat export
//!   ([`ChatframeError::NotChatExport`], [`ChatframeError::InvalidTimestamp`],
//!   [`ChatframeError::InvalidLine`]). Check with
//!   [`is_malformed_input`](ChatframeError::is_malformed_input).
//! - **Schema violation**: a table is missing a column, carries an extra one,
//!   or a typed column has the wrong type ([`ChatframeError::Schema`]). Check
//!   with [`is_schema_violation`](ChatframeError::is_schema_violation).
//! - **I/O**: propagated unchanged from the file layer.

use std::io;
use std::path::PathBuf;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;

use crate::schema::DType;

/// A specialized [`Result`] type for chatframe operations.
///
/// # Example
///
/// ```rust
/// use chatframe::error::Result;
/// use chatframe::ChatRecord;
///
/// fn my_function() -> Result<Vec<ChatRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatframeError>;

/// The error type for all chatframe operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatframeError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing Parquet)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The text input yielded no chat messages at all.
    ///
    /// Raised for empty files and for files where no line carries the
    /// `M/D/YY, H:MM AM - Author: Message` prefix.
    #[error("Input is not a chat export{}: no message lines found in {lines} line(s)", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    NotChatExport {
        /// The file path, if available
        path: Option<PathBuf>,
        /// Number of lines read from the input
        lines: usize,
    },

    /// A line matched the message prefix but its date/time could not be parsed.
    #[error("Invalid timestamp '{value}' on line {line}")]
    InvalidTimestamp {
        /// 1-based line number
        line: usize,
        /// The date/time text that failed to parse
        value: String,
    },

    /// A date-prefixed line could not be turned into a message.
    #[error("Invalid chat line {line}: {reason}")]
    InvalidLine {
        /// 1-based line number
        line: usize,
        /// Description of what's wrong
        reason: String,
    },

    /// The table does not satisfy the dataset's schema.
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaError),

    /// Arrow error while assembling or reshaping a table.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet encoding or decoding error.
    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Errors raised when a schema is malformed or a table does not match it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The table is missing a column declared by the schema.
    #[error("missing required column {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// The table has a column the schema does not declare.
    #[error("unexpected column {column} not present in schema")]
    ExtraColumn {
        /// The name of the extra column.
        column: String,
    },

    /// A column name appears more than once.
    #[error("column {column} appears more than once")]
    DuplicateColumn {
        /// The repeated column name.
        column: String,
    },

    /// A typed column has a different runtime type than declared.
    #[error("type mismatch for column {column}: schema requires {expected}, table has {actual}")]
    TypeMismatch {
        /// The name of the column with mismatched type.
        column: String,
        /// The type the schema requires.
        expected: DType,
        /// The type found in the table.
        actual: DataType,
    },

    /// A dtype was declared for a column that is not part of the schema.
    #[error("dtype declared for unknown column {column}")]
    UnknownDtypeColumn {
        /// The name of the unknown column.
        column: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatframeError {
    /// Creates a "not a chat export" error.
    pub fn not_chat_export(path: Option<PathBuf>, lines: usize) -> Self {
        ChatframeError::NotChatExport { path, lines }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(line: usize, value: impl Into<String>) -> Self {
        ChatframeError::InvalidTimestamp {
            line,
            value: value.into(),
        }
    }

    /// Creates an invalid line error.
    pub fn invalid_line(line: usize, reason: impl Into<String>) -> Self {
        ChatframeError::InvalidLine {
            line,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatframeError::Io(_))
    }

    /// Returns `true` if the input was not shaped like a chat export.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ChatframeError::NotChatExport { .. }
                | ChatframeError::InvalidTimestamp { .. }
                | ChatframeError::InvalidLine { .. }
        )
    }

    /// Returns `true` if a table failed schema validation.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, ChatframeError::Schema(_))
    }

    /// Returns the underlying schema error, if any.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            ChatframeError::Schema(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatframeError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_not_chat_export_with_path() {
        let err = ChatframeError::not_chat_export(Some(PathBuf::from("/tmp/chat.txt")), 0);
        let display = err.to_string();
        assert!(display.contains("/tmp/chat.txt"));
        assert!(display.contains("0 line(s)"));
    }

    #[test]
    fn test_not_chat_export_without_path() {
        let err = ChatframeError::not_chat_export(None, 3);
        assert!(!err.to_string().contains("file:"));
    }

    #[test]
    fn test_invalid_timestamp_display() {
        let err = ChatframeError::invalid_timestamp(7, "13/45/20, 8:38 PM");
        let display = err.to_string();
        assert!(display.contains("line 7"));
        assert!(display.contains("13/45/20"));
    }

    #[test]
    fn test_schema_error_display() {
        let err = ChatframeError::from(SchemaError::MissingColumn {
            column: "TIMESTAMP".into(),
        });
        let display = err.to_string();
        assert!(display.contains("Schema violation"));
        assert!(display.contains("TIMESTAMP"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = SchemaError::TypeMismatch {
            column: "TIMESTAMP".into(),
            expected: DType::Timestamp,
            actual: DataType::Utf8,
        };
        let display = err.to_string();
        assert!(display.contains("TIMESTAMP"));
        assert!(display.contains("timestamp"));
        assert!(display.contains("Utf8"));
    }

    #[test]
    fn test_error_classes() {
        let io_err = ChatframeError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_malformed_input());
        assert!(!io_err.is_schema_violation());

        let malformed = ChatframeError::not_chat_export(None, 0);
        assert!(malformed.is_malformed_input());
        assert!(!malformed.is_schema_violation());
        assert!(ChatframeError::invalid_line(1, "no author").is_malformed_input());

        let schema = ChatframeError::from(SchemaError::ExtraColumn {
            column: "X".into(),
        });
        assert!(schema.is_schema_violation());
        assert!(!schema.is_malformed_input());
        assert_eq!(
            schema.schema_error(),
            Some(&SchemaError::ExtraColumn { column: "X".into() })
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ChatframeError::from(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let err = ChatframeError::invalid_timestamp(1, "bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidTimestamp"));
    }
}
