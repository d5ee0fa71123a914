//! Property-based tests for chatframe.
//!
//! These tests generate random well-formed exports to check that parsing
//! keeps every row and every message intact.

use chatframe::prelude::*;
use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;

/// Generate a random record using fast strategies (no regex!)
fn arb_record() -> impl Strategy<Value = ChatRecord> {
    (
        prop::sample::select(vec![
            "Alice".to_string(),
            "Bob".to_string(),
            "Author 1".to_string(),
            "User123".to_string(),
            "Иван".to_string(),
            "+1 555 0100".to_string(),
        ]),
        prop::sample::select(vec![
            "Hello".to_string(),
            "I like balloons too!".to_string(),
            "<Media omitted>".to_string(),
            "note: meet at 10:30".to_string(),
            "a - b - c".to_string(),
            "Привет мир".to_string(),
            "🎉🔥💀 emoji".to_string(),
            "False".to_string(),
            String::new(),
        ]),
        // 2000-01-01 .. 2068-12-31, minute precision
        (0u32..25_000, 0u32..24, 0u32..60),
    )
        .prop_map(|(author, message, (day, hour, minute))| {
            let date = NaiveDate::from_ymd_opt(2000, 1, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(u64::from(day)))
                .unwrap();
            let timestamp = date.and_hms_opt(hour, minute, 0).unwrap().and_utc();
            ChatRecord::new("chat", timestamp, author, message)
        })
}

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<ChatRecord>> {
    prop::collection::vec(arb_record(), 1..max_len)
}

/// Render a record the way the export tool writes it.
fn export_line(record: &ChatRecord) -> String {
    format!(
        "{} - {}: {}",
        format_export_time(record.timestamp),
        record.author,
        record.message
    )
}

fn format_export_time(ts: DateTime<Utc>) -> String {
    ts.format("%-m/%-d/%y, %-I:%M %p").to_string()
}

fn export(records: &[ChatRecord]) -> String {
    records
        .iter()
        .map(export_line)
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSING PROPERTIES
    // ============================================

    /// Every exported line comes back as exactly the record it was made from
    #[test]
    fn parse_restores_records(records in arb_records(30)) {
        let parsed = TxtParser::new().parse_str(&export(&records), "chat").unwrap();
        prop_assert_eq!(parsed, records);
    }

    /// Row count is preserved through the dataset loader
    #[test]
    fn dataset_preserves_row_count(records in arb_records(30)) {
        let dataset = ChatDataset::load_from_str(
            &Schema::chat(),
            &export(&records),
            "chat",
            &TxtConfig::default(),
        ).unwrap();
        prop_assert_eq!(dataset.num_rows(), records.len());
        prop_assert_eq!(dataset.data().num_columns(), Schema::chat().columns().len());
    }

    /// Arbitrary text without a date prefix is never accepted as a chat
    #[test]
    fn prefixless_text_is_rejected(lines in prop::collection::vec("[a-zA-Z ,.!?]{0,40}", 0..10)) {
        let err = TxtParser::new().parse_str(&lines.join("\n"), "chat").unwrap_err();
        prop_assert!(err.is_malformed_input());
    }

    /// Missing any declared column is always a schema violation
    #[test]
    fn missing_column_is_schema_violation(records in arb_records(10), dropped in 0usize..4) {
        let batch = chatframe::table::records_to_batch(&records).unwrap();
        let keep: Vec<usize> = (0..4).filter(|&i| i != dropped).collect();
        let narrowed = batch.project(&keep).unwrap();

        let err = ChatDataset::load_from_record_batch(&Schema::chat(), narrowed).unwrap_err();
        prop_assert!(err.is_schema_violation());
    }
}

#[cfg(feature = "parquet")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Text load, Parquet save and Parquet load give back an equal dataset
    #[test]
    fn parquet_round_trip_is_lossless(records in arb_records(30)) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chat.parquet");

        let from_text = ChatDataset::load_from_str(
            &Schema::chat(),
            &export(&records),
            "chat",
            &TxtConfig::default(),
        ).unwrap();
        from_text.save_to_parquet(&path).unwrap();
        let reloaded = ChatDataset::load_from_parquet(&Schema::chat(), &path).unwrap();

        prop_assert_eq!(reloaded, from_text);
    }
}
