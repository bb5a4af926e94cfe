//! The ranked template catalog and its first-match search.

#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::schema::TemplateValidator;
use crate::value::{Record, TemplateRecord};

/// All usable templates, ranked most-specific first.
///
/// Ranking is by field count, descending. The sort is stable, so
/// templates with equal field counts keep their store enumeration
/// order and the tie-break is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    validators: Vec<TemplateValidator>,
}

impl Catalog {
    /// Compile and rank a batch of stored template documents.
    ///
    /// A document that fails to compile is logged and skipped; one bad
    /// template never poisons the rest of the catalog.
    pub fn load(records: &[TemplateRecord]) -> Self {
        let mut validators = Vec::with_capacity(records.len());
        for record in records {
            match TemplateValidator::build(record) {
                Ok(validator) => validators.push(validator),
                Err(err) => {
                    warn!(template = %record.name, error = %err, "template_skipped");
                }
            }
        }

        validators.sort_by(|a, b| b.field_count().cmp(&a.field_count()));

        Catalog { validators }
    }

    /// Name of the first template, in rank order, that accepts the
    /// record. `None` when every template rejects it.
    pub fn best_match(&self, record: &Record) -> Option<&str> {
        for validator in &self.validators {
            match validator.validate(record) {
                Ok(()) => return Some(validator.name()),
                Err(reason) => {
                    debug!(template = %validator.name(), reason = %reason, "template_rejected");
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Compiled templates in rank order.
    pub fn validators(&self) -> &[TemplateValidator] {
        &self.validators
    }
}
