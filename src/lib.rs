//! # Chatframe
//!
//! A Rust library for turning exported WhatsApp chat logs into
//! schema-validated Apache Arrow tables, and for persisting those tables as
//! Parquet.
//!
//! ## Overview
//!
//! A chat export is plain text, one message per line:
//!
//! ```text
//! 2/5/20, 8:38 PM - Author 1: Hello world
//! 2/5/20, 8:39 PM - Author 2: I like balloons too!
//! ```
//!
//! Each line becomes a row with four columns: `CHAT_NAME` (the file name
//! without extension), `TIMESTAMP` (nanoseconds, UTC), `AUTHOR` and
//! `MESSAGE`. Every table, whether parsed from text, read from Parquet or
//! handed over in memory, is checked against a [`Schema`] before it is
//! wrapped in a [`ChatDataset`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatframe::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let schema = Schema::chat();
//!
//!     let dataset = ChatDataset::load_from_txt(&schema, "test_chat.txt")?;
//!     dataset.save_to_parquet("test_chat.parquet")?;
//!
//!     let reloaded = ChatDataset::load_from_parquet(&schema, "test_chat.parquet")?;
//!     assert_eq!(dataset, reloaded);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`dataset`]: [`ChatDataset`] and its loaders
//! - [`schema`]: [`Schema`], [`DType`](schema::DType), [`ChatColumn`](schema::ChatColumn)
//! - [`parser`]: [`TxtParser`](parser::TxtParser), line-by-line text loader
//! - [`parsing`]: line classification and timestamp parsing
//! - [`config`]: [`TxtConfig`](config::TxtConfig)
//! - [`table`]: conversion between [`ChatRecord`]s and Arrow tables
//! - [`storage`]: Parquet read/write (feature `parquet`)
//! - [`error`]: [`ChatframeError`], [`SchemaError`](error::SchemaError), [`Result`]
//! - [`prelude`]: Convenient re-exports

pub mod config;
pub mod dataset;
pub mod error;
pub mod parser;
pub mod parsing;
pub mod record;
pub mod schema;
#[cfg(feature = "parquet")]
pub mod storage;
pub mod table;

// Re-export the main types at the crate root for convenience
pub use dataset::ChatDataset;
pub use error::{ChatframeError, Result};
pub use record::ChatRecord;
pub use schema::Schema;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatframe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ChatDataset, ChatRecord};

    // Error types
    pub use crate::error::{ChatframeError, Result, SchemaError};

    // Schema
    pub use crate::schema::{ChatColumn, ColumnSet, DType, Schema};

    // Parsing
    pub use crate::config::TxtConfig;
    pub use crate::parser::TxtParser;
}
