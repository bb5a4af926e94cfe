use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::value::{FieldValue, Record, TemplateRecord};
use crate::{classify, Classification, EngineError};
use crate::normalize::normalize_dates;

fn record(entries: &[(&str, FieldValue)]) -> Record {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn template(name: &str, fields: &[(&str, FieldValue)]) -> TemplateRecord {
    TemplateRecord {
        name: name.to_string(),
        fields: record(fields),
    }
}

fn str_value(text: &str) -> FieldValue {
    FieldValue::Str(text.to_string())
}

fn date_value(year: i32, month: u32, day: u32) -> FieldValue {
    FieldValue::Date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

fn sample_templates() -> Vec<TemplateRecord> {
    vec![
        template("EmailForm", &[("email", str_value("python@python.ru"))]),
        template("PhoneForm", &[("phone", str_value("+7 456 789 32 12"))]),
        template("DateForm", &[("current_date", date_value(2024, 5, 21))]),
        template(
            "MultyFieldForm",
            &[
                ("email", str_value("python@python.ru")),
                ("phone", str_value("+7 456 789 32 12")),
                ("current_date", date_value(2024, 5, 21)),
            ],
        ),
    ]
}

#[test]
fn email_record_matches_email_form() {
    let catalog = Catalog::load(&sample_templates());
    let input = record(&[("email", str_value("python@python.ru"))]);
    assert_eq!(catalog.best_match(&input), Some("EmailForm"));
}

#[test]
fn dotted_date_string_matches_date_form_after_normalization() {
    let catalog = Catalog::load(&sample_templates());
    let input = normalize_dates(record(&[("current_date", str_value("21.05.2024"))]));
    assert_eq!(catalog.best_match(&input), Some("DateForm"));
}

#[test]
fn wider_template_wins_over_its_single_field_subsets() {
    let catalog = Catalog::load(&sample_templates());
    let input = normalize_dates(record(&[
        ("email", str_value("a@b.ru")),
        ("phone", str_value("+7 456 789 32 12")),
        ("current_date", str_value("2024-05-21")),
    ]));
    assert_eq!(catalog.best_match(&input), Some("MultyFieldForm"));
}

#[test]
fn unmatchable_record_yields_none() {
    let catalog = Catalog::load(&sample_templates());
    let input = record(&[("some_field", str_value("hello world"))]);
    assert_eq!(catalog.best_match(&input), None);
}

#[test]
fn ranking_is_monotonically_non_increasing() {
    let catalog = Catalog::load(&sample_templates());
    let counts: Vec<usize> = catalog
        .validators()
        .iter()
        .map(|v| v.field_count())
        .collect();
    for pair in counts.windows(2) {
        assert!(pair[0] >= pair[1], "ranking out of order: {counts:?}");
    }
    assert_eq!(catalog.validators()[0].name(), "MultyFieldForm");
}

#[test]
fn equal_field_counts_keep_enumeration_order() {
    // EmailForm and PhoneForm both have one field. The stable sort must
    // keep EmailForm first because it was enumerated first.
    let templates = vec![
        template("EmailForm", &[("email", str_value("python@python.ru"))]),
        template("PhoneForm", &[("phone", str_value("+7 456 789 32 12"))]),
    ];
    let catalog = Catalog::load(&templates);
    let names: Vec<&str> = catalog.validators().iter().map(|v| v.name()).collect();
    assert_eq!(names, ["EmailForm", "PhoneForm"]);
}

#[test]
fn matching_is_deterministic() {
    let catalog = Catalog::load(&sample_templates());
    let input = record(&[("email", str_value("python@python.ru"))]);
    let first = catalog.best_match(&input).map(str::to_string);
    for _ in 0..10 {
        assert_eq!(catalog.best_match(&input).map(str::to_string), first);
    }
}

#[test]
fn malformed_templates_are_skipped_not_fatal() {
    let templates = vec![
        template("Broken", &[]),
        template("EmailForm", &[("email", str_value("python@python.ru"))]),
        template("PhoneForm", &[("phone", str_value("+7 456 789 32 12"))]),
    ];
    let catalog = Catalog::load(&templates);
    assert_eq!(catalog.len(), 2);
    let input = record(&[("email", str_value("python@python.ru"))]);
    assert_eq!(catalog.best_match(&input), Some("EmailForm"));
}

#[test]
fn superset_records_match_no_narrower_template() {
    let catalog = Catalog::load(&sample_templates());
    let input = record(&[
        ("email", str_value("python@python.ru")),
        ("note", str_value("extra")),
    ]);
    assert_eq!(catalog.best_match(&input), None);
}

#[test]
fn classify_reports_the_matched_template() {
    let catalog = Catalog::load(&sample_templates());
    let input = record(&[("email", str_value("python@python.ru"))]);
    let outcome = classify(input, &catalog).unwrap();
    assert_eq!(outcome, Classification::Matched("EmailForm".to_string()));
}

#[test]
fn classify_normalizes_before_matching() {
    let catalog = Catalog::load(&sample_templates());
    let input = record(&[("current_date", str_value("21.05.2024"))]);
    let outcome = classify(input, &catalog).unwrap();
    assert_eq!(outcome, Classification::Matched("DateForm".to_string()));
}

#[test]
fn classify_falls_back_to_inference() {
    let catalog = Catalog::load(&sample_templates());
    let input = record(&[
        ("some_field", str_value("hello world")),
        ("count", FieldValue::Int(42)),
    ]);
    let outcome = classify(input, &catalog).unwrap();
    match outcome {
        Classification::Inferred(labels) => {
            assert_eq!(labels["some_field"], "TEXT");
            assert_eq!(
                labels["count"],
                "INT, данный тип данных не поддержан ни в одном из шаблонов"
            );
            let keys: Vec<&str> = labels.keys().map(String::as_str).collect();
            assert_eq!(keys, ["some_field", "count"]);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn classify_rejects_empty_records() {
    let catalog = Catalog::load(&sample_templates());
    let err = classify(Record::new(), &catalog).expect_err("empty record should be refused");
    assert!(matches!(err, EngineError::EmptyRecord));
}
