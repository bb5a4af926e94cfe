//! Template compilation and record validation.
//!
//! A stored template document is compiled once into a
//! [`TemplateValidator`] holding one [`FieldSpec`] per field. Validation
//! is closed-world: a record matches only when it carries exactly the
//! template's field set with every type and format satisfied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::semantics::{satisfies_tag, tag_for_field, SemanticTag};
use crate::value::{FieldType, FieldValue, Record, TemplateRecord};

/// Compiled requirement for a single template field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub value_type: FieldType,
    pub semantic: SemanticTag,
}

/// Why a stored template document could not be compiled.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template name is empty")]
    EmptyName,
    #[error("template '{name}' has no fields")]
    NoFields { name: String },
    #[error("template '{name}' field '{field}' has a null sample value")]
    NullSample { name: String, field: String },
}

/// Why a record failed one template's validation. Drives the try-next
/// loop in the catalog; only ever logged, never returned to clients.
#[derive(Debug, Error)]
pub enum RejectionReason {
    #[error("required field '{field}' is missing")]
    MissingField { field: String },
    #[error("field '{field}' is not part of this template")]
    UnexpectedField { field: String },
    #[error("field '{field}' expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: &'static str,
    },
    #[error("field '{field}' does not satisfy its {tag} format")]
    SemanticMismatch { field: String, tag: SemanticTag },
}

/// One compiled template: its name and the exact field set a record
/// must present to match it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateValidator {
    name: String,
    fields: Vec<FieldSpec>,
}

impl TemplateValidator {
    /// Compile a stored template document.
    ///
    /// Each field's required type comes from its sample value and its
    /// semantic tag from its name. A blank name, an empty field set, or
    /// a null sample makes the whole template unusable.
    pub fn build(record: &TemplateRecord) -> Result<Self, TemplateError> {
        if record.name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if record.fields.is_empty() {
            return Err(TemplateError::NoFields {
                name: record.name.clone(),
            });
        }

        let mut fields = Vec::with_capacity(record.fields.len());
        for (name, sample) in &record.fields {
            let value_type = sample.field_type().ok_or_else(|| TemplateError::NullSample {
                name: record.name.clone(),
                field: name.clone(),
            })?;
            fields.push(FieldSpec {
                name: name.clone(),
                value_type,
                semantic: tag_for_field(name),
            });
        }

        Ok(TemplateValidator {
            name: record.name.clone(),
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|spec| spec.name == name)
    }

    /// Check a record against this template.
    ///
    /// Every template field must be present and satisfied, and the
    /// record must carry no key outside the template's field set.
    pub fn validate(&self, record: &Record) -> Result<(), RejectionReason> {
        for spec in &self.fields {
            let value = record
                .get(&spec.name)
                .ok_or_else(|| RejectionReason::MissingField {
                    field: spec.name.clone(),
                })?;
            self.check_value(spec, value)?;
        }

        if let Some(extra) = record.keys().find(|key| !self.has_field(key)) {
            return Err(RejectionReason::UnexpectedField {
                field: extra.clone(),
            });
        }

        Ok(())
    }

    fn check_value(&self, spec: &FieldSpec, value: &FieldValue) -> Result<(), RejectionReason> {
        match value.field_type() {
            Some(found) if found == spec.value_type => {}
            _ => {
                return Err(RejectionReason::TypeMismatch {
                    field: spec.name.clone(),
                    expected: spec.value_type,
                    found: value.type_name(),
                })
            }
        }

        match (spec.semantic, value) {
            (SemanticTag::None, _) => Ok(()),
            (tag, FieldValue::Str(text)) if satisfies_tag(tag, text) => Ok(()),
            (tag, _) => Err(RejectionReason::SemanticMismatch {
                field: spec.name.clone(),
                tag,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_dates;
    use chrono::NaiveDate;

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

    #[test]
    fn build_captures_every_field() {
        let template = template(
            "MultyFieldForm",
            &[
                ("email", str_value("python@python.ru")),
                ("phone", str_value("+7 456 789 32 12")),
                (
                    "current_date",
                    FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 21).unwrap()),
                ),
            ],
        );
        let validator = TemplateValidator::build(&template).unwrap();
        assert_eq!(validator.name(), "MultyFieldForm");
        assert_eq!(validator.field_count(), 3);
        let names: Vec<&str> = validator.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["email", "phone", "current_date"]);
    }

    #[test]
    fn build_rejects_blank_names() {
        let bad = template("   ", &[("email", str_value("a@b.ru"))]);
        let err = TemplateValidator::build(&bad).expect_err("template should be invalid");
        assert!(matches!(err, TemplateError::EmptyName));
    }

    #[test]
    fn build_rejects_empty_field_sets() {
        let bad = template("Empty", &[]);
        let err = TemplateValidator::build(&bad).expect_err("template should be invalid");
        match err {
            TemplateError::NoFields { name } => assert_eq!(name, "Empty"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn build_rejects_null_samples() {
        let bad = template("Nullish", &[("email", FieldValue::Null)]);
        let err = TemplateValidator::build(&bad).expect_err("template should be invalid");
        match err {
            TemplateError::NullSample { name, field } => {
                assert_eq!(name, "Nullish");
                assert_eq!(field, "email");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn field_names_drive_semantic_tags() {
        let template = template(
            "ExtraFieldsForm",
            &[
                ("user_email", str_value("a@b.ru")),
                ("some_text", str_value("plain")),
            ],
        );
        let validator = TemplateValidator::build(&template).unwrap();
        assert_eq!(validator.fields()[0].semantic, SemanticTag::Email);
        assert_eq!(validator.fields()[1].semantic, SemanticTag::None);
    }

    #[test]
    fn extra_keys_are_rejected() {
        let template = template("EmailForm", &[("email", str_value("python@python.ru"))]);
        let validator = TemplateValidator::build(&template).unwrap();
        let input = record(&[
            ("email", str_value("python@python.ru")),
            ("note", str_value("unexpected")),
        ]);
        let err = validator.validate(&input).expect_err("record should be rejected");
        match err {
            RejectionReason::UnexpectedField { field } => assert_eq!(field, "note"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_keys_are_rejected() {
        let template = template("EmailForm", &[("email", str_value("python@python.ru"))]);
        let validator = TemplateValidator::build(&template).unwrap();
        let err = validator
            .validate(&record(&[]))
            .expect_err("record should be rejected");
        match err {
            RejectionReason::MissingField { field } => assert_eq!(field, "email"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_mismatches_are_rejected() {
        let template = template("DateForm", &[(
            "current_date",
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 21).unwrap()),
        )]);
        let validator = TemplateValidator::build(&template).unwrap();
        let input = record(&[("current_date", FieldValue::Int(20240521))]);
        let err = validator.validate(&input).expect_err("record should be rejected");
        match err {
            RejectionReason::TypeMismatch {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "current_date");
                assert_eq!(expected, FieldType::Date);
                assert_eq!(found, "INT");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn semantic_formats_are_enforced() {
        let template = template("PhoneForm", &[("phone", str_value("+7 456 789 32 12"))]);
        let validator = TemplateValidator::build(&template).unwrap();
        let input = record(&[("phone", str_value("not a phone"))]);
        let err = validator.validate(&input).expect_err("record should be rejected");
        match err {
            RejectionReason::SemanticMismatch { field, tag } => {
                assert_eq!(field, "phone");
                assert_eq!(tag, SemanticTag::Phone);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_values_never_satisfy_a_field() {
        let template = template("EmailForm", &[("email", str_value("python@python.ru"))]);
        let validator = TemplateValidator::build(&template).unwrap();
        let input = record(&[("email", FieldValue::Null)]);
        let err = validator.validate(&input).expect_err("record should be rejected");
        assert!(matches!(err, RejectionReason::TypeMismatch { .. }));
    }

    #[test]
    fn normalized_dates_validate_against_date_fields() {
        let template = template("DateForm", &[(
            "current_date",
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 21).unwrap()),
        )]);
        let validator = TemplateValidator::build(&template).unwrap();
        let input = normalize_dates(record(&[("current_date", str_value("21.05.2024"))]));
        assert!(validator.validate(&input).is_ok());
    }
}
