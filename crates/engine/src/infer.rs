//! Field type inference for records no template matched.

use crate::semantics::{satisfies_tag, SemanticTag};
use crate::value::{FieldValue, Record};
use indexmap::IndexMap;

/// Per-field inferred labels, in the record's key order.
pub type InferenceResult = IndexMap<String, String>;

/// Appended after the runtime type name when no template anywhere could
/// accept a value of that shape.
const UNSUPPORTED_SUFFIX: &str = "данный тип данных не поддержан ни в одном из шаблонов";

/// Format checks tried against the stringified value, in order.
const FORMAT_LABELS: &[(SemanticTag, &str)] = &[
    (SemanticTag::Phone, "PHONE"),
    (SemanticTag::Email, "EMAIL"),
];

/// Produce exactly one label per field of the record.
///
/// Works on normalized records: date strings have already become `Date`
/// values by the time inference runs.
pub fn infer_types(record: &Record) -> InferenceResult {
    record
        .iter()
        .map(|(name, value)| (name.clone(), label_for(value)))
        .collect()
}

fn label_for(value: &FieldValue) -> String {
    if matches!(value, FieldValue::Date(_)) {
        return "DATE".to_string();
    }

    if let Some(text) = value.stringified() {
        for (tag, label) in FORMAT_LABELS {
            if satisfies_tag(*tag, &text) {
                return (*label).to_string();
            }
        }
        if matches!(value, FieldValue::Str(_)) {
            return "TEXT".to_string();
        }
    }

    format!("{}, {}", value.type_name(), UNSUPPORTED_SUFFIX)
}
