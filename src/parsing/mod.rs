//! Line-level parsing utilities for chat export text.
//!
//! This module recognises individual lines; [`crate::parser::TxtParser`]
//! drives it over a whole file.

pub mod whatsapp;

pub use whatsapp::{ChatLine, chat_name_from_path, classify_line, parse_timestamp};
