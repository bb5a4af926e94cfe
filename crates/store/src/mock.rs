//! Built-in mock templates for demos and tests.

use chrono::Utc;
use engine::{FieldValue, Record, TemplateRecord};

use crate::{StoreError, TemplateStore};

/// Insert the mock templates into the store. Returns how many documents
/// were written. Documents are keyed by name, so reseeding upserts the
/// same five templates instead of duplicating them.
pub fn seed_templates(store: &TemplateStore) -> Result<usize, StoreError> {
    let templates = mock_templates();
    store.insert_many(&templates)?;
    Ok(templates.len())
}

/// The five built-in mock templates, from a single-field email form up
/// to a five-field form mixing tagged, dated, and free-text fields.
///
/// "MultyFieldForm" is spelled the way the production documents spell
/// it.
pub fn mock_templates() -> Vec<TemplateRecord> {
    let today = Utc::now().date_naive();

    vec![
        template("EmailForm", &[("email", str_value("python@python.ru"))]),
        template("PhoneForm", &[("phone", str_value("+7 456 789 32 12"))]),
        template("DateForm", &[("current_date", FieldValue::Date(today))]),
        template(
            "MultyFieldForm",
            &[
                ("email", str_value("python@python.ru")),
                ("phone", str_value("+7 456 789 32 12")),
                ("current_date", FieldValue::Date(today)),
            ],
        ),
        template(
            "ExtraFieldsForm",
            &[
                ("email", str_value("python@python.ru")),
                ("user_email", str_value("python@python.ru")),
                ("phone", str_value("+7 456 789 32 12")),
                ("current_date", FieldValue::Date(today)),
                (
                    "some_text",
                    str_value("съешь еще этих французских булок да выпей йаду"),
                ),
            ],
        ),
    ]
}

fn template(name: &str, fields: &[(&str, FieldValue)]) -> TemplateRecord {
    let mut record = Record::new();
    for (field, value) in fields {
        record.insert(field.to_string(), value.clone());
    }
    TemplateRecord {
        name: name.to_string(),
        fields: record,
    }
}

fn str_value(text: &str) -> FieldValue {
    FieldValue::Str(text.to_string())
}
