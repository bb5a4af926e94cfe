use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat field-name → value mapping.
///
/// Both incoming records and stored template samples use this shape.
/// Insertion order is preserved so responses keep the caller's key order.
pub type Record = IndexMap<String, FieldValue>;

/// A single scalar field value.
///
/// Serialization is adjacently tagged so a date sample survives a store
/// round-trip as a date instead of collapsing back into a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

/// Structural scalar kinds a template field can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Date => write!(f, "date"),
        }
    }
}

impl FieldValue {
    /// Structural kind of this value. `Null` carries none, which makes a
    /// null sample unusable as a template field.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldValue::Str(_) => Some(FieldType::String),
            FieldValue::Int(_) | FieldValue::Float(_) => Some(FieldType::Number),
            FieldValue::Bool(_) => Some(FieldType::Boolean),
            FieldValue::Date(_) => Some(FieldType::Date),
            FieldValue::Null => None,
        }
    }

    /// Runtime type name as it appears in inference labels.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "STR",
            FieldValue::Int(_) => "INT",
            FieldValue::Float(_) => "FLOAT",
            FieldValue::Bool(_) => "BOOL",
            FieldValue::Date(_) => "DATE",
            FieldValue::Null => "NULL",
        }
    }

    /// Text form fed to the format heuristics. Dates are handled by the
    /// date step before stringification applies, and nulls have no text
    /// form; both return `None`.
    pub fn stringified(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Str(s) => Some(Cow::Borrowed(s.as_str())),
            FieldValue::Int(i) => Some(Cow::Owned(i.to_string())),
            FieldValue::Float(f) => Some(Cow::Owned(f.to_string())),
            FieldValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            FieldValue::Date(_) | FieldValue::Null => None,
        }
    }

    /// Convert a decoded JSON scalar into a field value.
    ///
    /// Records are flat by contract, so arrays and nested objects are
    /// refused rather than silently flattened or skipped.
    pub fn from_json(value: serde_json::Value) -> Result<Self, UnsupportedValue> {
        match value {
            serde_json::Value::String(s) => Ok(FieldValue::Str(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FieldValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(FieldValue::Float(f))
                } else {
                    Err(UnsupportedValue::Number(n.to_string()))
                }
            }
            serde_json::Value::Bool(b) => Ok(FieldValue::Bool(b)),
            serde_json::Value::Null => Ok(FieldValue::Null),
            serde_json::Value::Array(_) => Err(UnsupportedValue::Array),
            serde_json::Value::Object(_) => Err(UnsupportedValue::Object),
        }
    }
}

/// A JSON value that cannot live in a flat record.
#[derive(Debug, Error)]
pub enum UnsupportedValue {
    #[error("array values are not supported in flat records")]
    Array,
    #[error("nested objects are not supported in flat records")]
    Object,
    #[error("number {0} does not fit a supported numeric type")]
    Number(String),
}

/// A stored template document: a name plus one representative sample
/// value per field. `fields` never carries the name or any store key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    pub fields: Record,
}
