//! Date normalization for incoming records.
//!
//! Runs before any template is consulted so that matching and inference
//! see `Date` values instead of raw date-looking strings.

use chrono::NaiveDate;

use crate::value::{FieldValue, Record};

/// Accepted textual date layouts, tried in order.
const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// Rewrite every string field that parses as a date into a `Date` value.
///
/// Unrecognized strings pass through untouched and no error is raised.
/// Non-string values are never inspected. The pass is idempotent: a
/// parsed date is no longer a string, so a second run changes nothing.
pub fn normalize_dates(record: Record) -> Record {
    record
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                FieldValue::Str(raw) => match parse_date(&raw) {
                    Some(date) => FieldValue::Date(date),
                    None => FieldValue::Str(raw),
                },
                other => other,
            };
            (name, value)
        })
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, FieldValue)]) -> Record {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn dotted_dates_are_recognized() {
        let input = record(&[("current_date", FieldValue::Str("21.05.2024".into()))]);
        let normalized = normalize_dates(input);
        let expected = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap();
        assert_eq!(normalized["current_date"], FieldValue::Date(expected));
    }

    #[test]
    fn iso_dates_are_recognized() {
        let input = record(&[("current_date", FieldValue::Str("2024-05-21".into()))]);
        let normalized = normalize_dates(input);
        let expected = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap();
        assert_eq!(normalized["current_date"], FieldValue::Date(expected));
    }

    #[test]
    fn non_date_strings_pass_through() {
        let input = record(&[("note", FieldValue::Str("hello world".into()))]);
        let normalized = normalize_dates(input);
        assert_eq!(normalized["note"], FieldValue::Str("hello world".into()));
    }

    #[test]
    fn normalization_is_idempotent() {
        let input = record(&[
            ("current_date", FieldValue::Str("21.05.2024".into())),
            ("note", FieldValue::Str("not a date".into())),
        ]);
        let once = normalize_dates(input);
        let twice = normalize_dates(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn non_string_values_are_untouched() {
        let input = record(&[("count", FieldValue::Int(42))]);
        let normalized = normalize_dates(input);
        assert_eq!(normalized["count"], FieldValue::Int(42));
    }

    #[test]
    fn key_order_is_preserved() {
        let input = record(&[
            ("b", FieldValue::Str("2024-05-21".into())),
            ("a", FieldValue::Str("x".into())),
        ]);
        let normalized = normalize_dates(input);
        let keys: Vec<&str> = normalized.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
