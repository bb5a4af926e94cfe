//! # Formcheck Engine (`engine`)
//!
//! ## Purpose
//!
//! `engine` is the pure classification core of formcheck. It compiles
//! stored template documents into validators, ranks them by specificity,
//! matches incoming flat records against them, and falls back to
//! per-field type inference when nothing matches. It holds no I/O: the
//! store and the HTTP layer live in their own crates and feed records in.
//!
//! ## Core Types
//!
//! - [`FieldValue`] / [`Record`]: a flat, order-preserving map of scalar
//!   field values, shared by incoming records and stored samples.
//! - [`TemplateRecord`]: a stored template document, one sample value
//!   per field.
//! - [`TemplateValidator`] / [`FieldSpec`]: a compiled template and its
//!   per-field requirements (structural type plus semantic format).
//! - [`Catalog`]: all usable validators, ranked most-specific first.
//! - [`Classification`]: the outcome of [`classify`], either the name of
//!   the matched template or an [`InferenceResult`] of per-field labels.
//!
//! ## Example Usage
//!
//! ```
//! use engine::{classify, Catalog, Classification, FieldValue, Record, TemplateRecord};
//!
//! let templates = vec![TemplateRecord {
//!     name: "EmailForm".to_string(),
//!     fields: Record::from_iter([(
//!         "email".to_string(),
//!         FieldValue::Str("python@python.ru".to_string()),
//!     )]),
//! }];
//! let catalog = Catalog::load(&templates);
//!
//! let record = Record::from_iter([(
//!     "email".to_string(),
//!     FieldValue::Str("rust@rust.ru".to_string()),
//! )]);
//! match classify(record, &catalog).unwrap() {
//!     Classification::Matched(name) => assert_eq!(name, "EmailForm"),
//!     Classification::Inferred(labels) => panic!("unexpected inference: {labels:?}"),
//! }
//! ```

pub mod catalog;
pub mod infer;
pub mod normalize;
pub mod schema;
pub mod semantics;
pub mod value;

use thiserror::Error;
use tracing::info;

pub use crate::catalog::Catalog;
pub use crate::infer::{infer_types, InferenceResult};
pub use crate::normalize::normalize_dates;
pub use crate::schema::{FieldSpec, RejectionReason, TemplateError, TemplateValidator};
pub use crate::semantics::SemanticTag;
pub use crate::value::{FieldType, FieldValue, Record, TemplateRecord, UnsupportedValue};

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A template accepted the record; carries the template name.
    Matched(String),
    /// No template accepted the record; carries per-field labels.
    Inferred(InferenceResult),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("record has no usable fields")]
    EmptyRecord,
}

/// Run the full pipeline on one record: normalize dates, search the
/// catalog, infer field types when no template matches.
///
/// An empty record is an error; everything downstream assumes at least
/// one field to work with.
pub fn classify(record: Record, catalog: &Catalog) -> Result<Classification, EngineError> {
    if record.is_empty() {
        return Err(EngineError::EmptyRecord);
    }

    let normalized = normalize_dates(record);

    match catalog.best_match(&normalized) {
        Some(name) => {
            info!(template = %name, "template_matched");
            Ok(Classification::Matched(name.to_string()))
        }
        None => {
            info!(fields = normalized.len(), "no_template_matched");
            Ok(Classification::Inferred(infer_types(&normalized)))
        }
    }
}
