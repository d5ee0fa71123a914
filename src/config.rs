//! Configuration for the text loader.
//!
//! [`TxtConfig`] controls how exported chat text is turned into records.
//! The defaults match the one-line Android export format
//! (`M/D/YY, H:MM AM - Author: Message`).
//!
//! # Example
//!
//! ```rust
//! use chatframe::config::TxtConfig;
//!
//! let config = TxtConfig::new()
//!     .with_chat_name("family")
//!     .with_join_continuation_lines(false);
//!
//! assert_eq!(config.chat_name.as_deref(), Some("family"));
//! ```

use serde::{Deserialize, Serialize};

/// Date/time formats tried, in order, for the prefix of a message line.
pub const DEFAULT_DATETIME_FORMATS: &[&str] = &["%m/%d/%y, %I:%M %p", "%m/%d/%y, %I:%M:%S %p"];

/// Configuration for parsing chat export text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxtConfig {
    /// Chat name for every row; `None` derives it from the file stem (default: None)
    pub chat_name: Option<String>,

    /// chrono formats tried in order against `"{date}, {time}"`
    pub datetime_formats: Vec<String>,

    /// Append lines without a date prefix to the previous message (default: true)
    pub join_continuation_lines: bool,

    /// Skip date-prefixed lines with no author, such as "X created group" (default: true)
    pub skip_system_notices: bool,
}

impl Default for TxtConfig {
    fn default() -> Self {
        Self {
            chat_name: None,
            datetime_formats: DEFAULT_DATETIME_FORMATS
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
            join_continuation_lines: true,
            skip_system_notices: true,
        }
    }
}

impl TxtConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a fixed chat name instead of deriving it from the file name.
    #[must_use]
    pub fn with_chat_name(mut self, name: impl Into<String>) -> Self {
        self.chat_name = Some(name.into());
        self
    }

    /// Replaces the date/time formats.
    #[must_use]
    pub fn with_datetime_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datetime_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether continuation lines are joined into the previous message.
    #[must_use]
    pub fn with_join_continuation_lines(mut self, join: bool) -> Self {
        self.join_continuation_lines = join;
        self
    }

    /// Sets whether system notices are skipped or rejected.
    #[must_use]
    pub fn with_skip_system_notices(mut self, skip: bool) -> Self {
        self.skip_system_notices = skip;
        self
    }
}
