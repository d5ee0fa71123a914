//! WhatsApp one-line export format.
//!
//! Every message starts on a line of the form
//!
//! ```text
//! 2/5/20, 8:38 PM - Author 1: Hello world
//! ```
//!
//! The part before the first `" - "` is the date and time; the rest is the
//! author and the message, separated by the first `": "`. A line is a
//! message header when its prefix parses with one of the configured
//! datetime formats, or when the prefix has the shape of a date and time
//! (in which case the timestamp is reported as unparseable). All other
//! lines continue the previous message.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

/// Any `D/M/Y, H:MM` style prefix, with `/`, `.` or `-` between date parts,
/// optional seconds and an optional AM/PM marker. Four-digit years match
/// here but still need a `%Y` format to parse.
const DATED_PREFIX_PATTERN: &str =
    r"^\d{1,4}[./-]\d{1,2}[./-]\d{1,4},?\s+\d{1,2}[:.]\d{2}(?:[:.]\d{2})?(?:\s*[AaPp]\.?\s?[Mm]\.?)?$";

static DATED_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DATED_PREFIX_PATTERN).expect("DATED_PREFIX_PATTERN is a valid regex")
});

/// Separator between the timestamp and the rest of a header line.
const PREFIX_DELIMITER: &str = " - ";

/// Separator between author and message.
const AUTHOR_DELIMITER: &str = ": ";

/// A classified line of export text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatLine<'a> {
    /// A new message.
    Message {
        /// Raw timestamp text, e.g. `2/5/20, 8:38 PM`
        stamp: &'a str,
        /// `None` when the stamp looks like a date but no format parses it
        timestamp: Option<DateTime<Utc>>,
        /// Everything before the first `": "`
        author: &'a str,
        /// Everything after the first `": "`, untouched
        message: &'a str,
    },
    /// A date-prefixed line with no author, e.g. "Alice created group".
    Notice {
        /// Raw timestamp text
        stamp: &'a str,
        /// Notice text
        text: &'a str,
    },
    /// A line without a date prefix.
    Continuation(&'a str),
}

/// Classifies one line of export text against the given datetime formats.
///
/// Author names containing `": "` cannot be told apart from the message, so
/// the first occurrence always wins.
pub fn classify_line<'a, S: AsRef<str>>(line: &'a str, formats: &[S]) -> ChatLine<'a> {
    let Some((stamp, rest)) = line.split_once(PREFIX_DELIMITER) else {
        return ChatLine::Continuation(line);
    };

    let timestamp = parse_timestamp(stamp, formats);
    if timestamp.is_none() && !looks_dated(stamp) {
        return ChatLine::Continuation(line);
    }

    match rest.split_once(AUTHOR_DELIMITER) {
        Some((author, message)) => ChatLine::Message {
            stamp,
            timestamp,
            author,
            message,
        },
        None => ChatLine::Notice { stamp, text: rest },
    }
}

fn looks_dated(stamp: &str) -> bool {
    DATED_PREFIX.is_match(stamp)
}

/// Parses timestamp text such as `2/5/20, 8:38 PM` into UTC wall-clock time.
///
/// The time is read as naive local time and tagged UTC without shifting.
/// Unicode spaces (newer exports put U+202F before AM/PM) are normalised
/// first. Returns `None` if no format matches.
pub fn parse_timestamp<S: AsRef<str>>(stamp: &str, formats: &[S]) -> Option<DateTime<Utc>> {
    let stamp = stamp.split_whitespace().collect::<Vec<_>>().join(" ");

    formats.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(&stamp, format.as_ref())
            .ok()
            .map(|naive| naive.and_utc())
    })
}

/// Chat name for a file: its base name without the extension.
pub fn chat_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
