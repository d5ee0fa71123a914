//! Text loader for chat exports.
//!
//! [`TxtParser`] reads exported chat text line by line and produces
//! [`ChatRecord`]s. It never returns an empty result: input without a single
//! message line fails with [`ChatframeError::NotChatExport`].
//!
//! # Example
//!
//! ```rust
//! use chatframe::parser::TxtParser;
//!
//! let parser = TxtParser::new();
//! let records = parser.parse_str(
//!     "2/5/20, 8:38 PM - Author 1: Hello world\n",
//!     "test_chat",
//! )?;
//! assert_eq!(records[0].author(), "Author 1");
//! # Ok::<(), chatframe::ChatframeError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::ChatRecord;
use crate::config::TxtConfig;
use crate::error::{ChatframeError, Result};
use crate::parsing::{ChatLine, chat_name_from_path, classify_line};

const BOM: char = '\u{feff}';

/// Parser for one-line chat export text.
#[derive(Debug, Clone, Default)]
pub struct TxtParser {
    config: TxtConfig,
}

impl TxtParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: TxtConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TxtConfig {
        &self.config
    }

    /// Parses an export file.
    ///
    /// The chat name is the configured one, or the file's base name without
    /// its extension.
    pub fn parse(&self, path: &Path) -> Result<Vec<ChatRecord>> {
        let chat_name = self
            .config
            .chat_name
            .clone()
            .unwrap_or_else(|| chat_name_from_path(path));

        let reader = BufReader::new(File::open(path)?);
        self.parse_reader(reader, &chat_name).map_err(|err| match err {
            ChatframeError::NotChatExport { path: None, lines } => {
                ChatframeError::not_chat_export(Some(path.to_path_buf()), lines)
            }
            other => other,
        })
    }

    /// Parses export text held in memory.
    ///
    /// A configured chat name takes precedence over `chat_name`.
    pub fn parse_str(&self, content: &str, chat_name: &str) -> Result<Vec<ChatRecord>> {
        let chat_name = self.config.chat_name.as_deref().unwrap_or(chat_name);
        self.parse_reader(content.as_bytes(), chat_name)
    }

    /// Parses export text from any buffered reader.
    pub fn parse_reader<R: BufRead>(&self, reader: R, chat_name: &str) -> Result<Vec<ChatRecord>> {
        let mut records: Vec<ChatRecord> = Vec::new();
        let mut line_count = 0usize;
        // Blank lines are only kept when more message text follows them.
        let mut blank_run = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            line_count = line_no;

            let line = if idx == 0 {
                line.strip_prefix(BOM).unwrap_or(&line)
            } else {
                line.as_str()
            };

            match classify_line(line, self.config.datetime_formats.as_slice()) {
                ChatLine::Message {
                    stamp,
                    timestamp,
                    author,
                    message,
                } => {
                    let timestamp = timestamp
                        .ok_or_else(|| ChatframeError::invalid_timestamp(line_no, stamp))?;
                    records.push(ChatRecord::new(chat_name, timestamp, author, message));
                }
                ChatLine::Notice { text, .. } => {
                    if !self.config.skip_system_notices {
                        return Err(ChatframeError::invalid_line(
                            line_no,
                            format!("no author delimiter in \"{text}\""),
                        ));
                    }
                    debug!("skipping system notice on line {line_no}: {text}");
                }
                ChatLine::Continuation(text) if text.trim().is_empty() => {
                    blank_run += 1;
                    continue;
                }
                ChatLine::Continuation(text) => match records.last_mut() {
                    Some(last) if self.config.join_continuation_lines => {
                        for _ in 0..blank_run {
                            last.push_line("");
                        }
                        last.push_line(text);
                    }
                    _ => warn!("skipping line {line_no} without a message prefix"),
                },
            }
            blank_run = 0;
        }

        if records.is_empty() {
            return Err(ChatframeError::not_chat_export(None, line_count));
        }

        debug!(
            "parsed {} records from {} lines of chat '{}'",
            records.len(),
            line_count,
            chat_name
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_str_basic() {
        let records = TxtParser::new()
            .parse_str(
                "2/5/20, 8:38 PM - Author 1: Hello world\n2/5/20, 8:39 PM - Author 2: Hi",
                "chat",
            )
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chat_name(), "chat");
        assert_eq!(
            records[0].timestamp(),
            Utc.with_ymd_and_hms(2020, 2, 5, 20, 38, 0).unwrap()
        );
        assert_eq!(records[1].author(), "Author 2");
        assert_eq!(records[1].message(), "Hi");
    }

    #[test]
    fn test_empty_input_is_not_chat_export() {
        let err = TxtParser::new().parse_str("", "chat").unwrap_err();
        assert!(matches!(err, ChatframeError::NotChatExport { lines: 0, .. }));
    }

    #[test]
    fn test_unmatched_lines_are_not_chat_export() {
        let err = TxtParser::new()
            .parse_str("hello\nworld\n", "chat")
            .unwrap_err();
        assert!(matches!(err, ChatframeError::NotChatExport { lines: 2, .. }));
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_only_notices_is_not_chat_export() {
        let err = TxtParser::new()
            .parse_str("2/5/20, 8:30 PM - Alice created group \"x\"", "chat")
            .unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_continuation_joined() {
        let records = TxtParser::new()
            .parse_str(
                "2/5/20, 8:38 PM - Alice: first\nsecond\n\nthird\n2/5/20, 8:39 PM - Bob: x",
                "chat",
            )
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message(), "first\nsecond\n\nthird");
    }

    #[test]
    fn test_continuation_skipped_when_disabled() {
        let parser = TxtParser::with_config(TxtConfig::new().with_join_continuation_lines(false));
        let records = parser
            .parse_str("2/5/20, 8:38 PM - Alice: first\nsecond", "chat")
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "first");
    }

    #[test]
    fn test_orphan_lines_before_first_message() {
        let records = TxtParser::new()
            .parse_str("preamble\n2/5/20, 8:38 PM - Alice: hi", "chat")
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "hi");
    }

    #[test]
    fn test_notice_rejected_when_not_skipping() {
        let parser = TxtParser::with_config(TxtConfig::new().with_skip_system_notices(false));
        let err = parser
            .parse_str(
                "2/5/20, 8:30 PM - Alice created group\n2/5/20, 8:38 PM - Alice: hi",
                "chat",
            )
            .unwrap_err();
        assert!(matches!(err, ChatframeError::InvalidLine { line: 1, .. }));
    }

    #[test]
    fn test_invalid_timestamp_reports_line() {
        let err = TxtParser::new()
            .parse_str(
                "2/5/20, 8:38 PM - Alice: hi\n13/45/20, 8:39 PM - Bob: hey",
                "chat",
            )
            .unwrap_err();
        assert!(matches!(err, ChatframeError::InvalidTimestamp { line: 2, .. }));
    }

    #[test]
    fn test_bom_and_crlf() {
        let records = TxtParser::new()
            .parse_str(
                "\u{feff}2/5/20, 8:38 PM - Alice: hi\r\n2/5/20, 8:39 PM - Bob: hey\r\n",
                "chat",
            )
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].author(), "Alice");
        assert_eq!(records[1].message(), "hey");
    }

    #[test]
    fn test_configured_chat_name_wins() {
        let parser = TxtParser::with_config(TxtConfig::new().with_chat_name("family"));
        let records = parser
            .parse_str("2/5/20, 8:38 PM - Alice: hi", "ignored")
            .unwrap();
        assert_eq!(records[0].chat_name(), "family");
    }

    #[test]
    fn test_parse_missing_file_is_io() {
        let err = TxtParser::new()
            .parse(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
