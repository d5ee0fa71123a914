//! One parsed chat line.
//!
//! [`ChatRecord`] is the row type behind a chat-shaped dataset: the text
//! loader produces it line by line, and [`ChatDataset::to_records`] turns a
//! table back into it.
//!
//! [`ChatDataset::to_records`]: crate::ChatDataset::to_records
//!
//! # Example
//!
//! ```
//! use chatframe::ChatRecord;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2020, 2, 5, 20, 38, 0).unwrap();
//! let record = ChatRecord::new("test_chat", ts, "Author 1", "Hello world");
//! assert_eq!(record.author(), "Author 1");
//! assert_eq!(record.message(), "Hello world");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message with the chat it belongs to.
///
/// | Field | Column | Type |
/// |-------|--------|------|
/// | `chat_name` | `CHAT_NAME` | `String` |
/// | `timestamp` | `TIMESTAMP` | `DateTime<Utc>` (nanosecond column) |
/// | `author` | `AUTHOR` | `String` |
/// | `message` | `MESSAGE` | `String` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Name of the chat, taken from the export's file name.
    pub chat_name: String,

    /// When the message was sent, as UTC wall-clock time.
    pub timestamp: DateTime<Utc>,

    /// Display name of the sender.
    pub author: String,

    /// Message text. May contain colons and newlines.
    pub message: String,
}

impl ChatRecord {
    /// Creates a record from its four fields.
    pub fn new(
        chat_name: impl Into<String>,
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            chat_name: chat_name.into(),
            timestamp,
            author: author.into(),
            message: message.into(),
        }
    }

    /// Returns the chat name.
    pub fn chat_name(&self) -> &str {
        &self.chat_name
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Appends a continuation line to the message text.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.message.push('\n');
        self.message.push_str(line);
    }
}
