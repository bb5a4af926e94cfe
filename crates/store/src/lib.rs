//! # Formcheck Store
//!
//! Backend-agnostic storage for template documents. A template document
//! is an [`engine::TemplateRecord`]: a name plus one sample value per
//! field. Documents are JSON-encoded and keyed by template name, so
//! writing a document with an existing name upserts it.
//!
//! ## Core Features
//!
//! - **Pluggable Backends**: Storage goes through the [`StoreBackend`]
//!   trait. Out of the box:
//!   - An in-memory backend for ephemeral storage (ideal for testing).
//!   - A Redb backend for persistent, on-disk storage (enabled via the
//!     `backend-redb` feature, on by default).
//! - **Ordered Enumeration**: Every backend scans in ascending key
//!   order. [`TemplateStore::list`] therefore returns templates in a
//!   stable order, which the catalog relies on to break ranking ties
//!   deterministically.
//!
//! ## Example Usage
//!
//! ```
//! use engine::{FieldValue, Record, TemplateRecord};
//! use store::{BackendConfig, TemplateStore};
//!
//! let store = TemplateStore::new(&BackendConfig::in_memory()).unwrap();
//!
//! let template = TemplateRecord {
//!     name: "EmailForm".to_string(),
//!     fields: Record::from_iter([(
//!         "email".to_string(),
//!         FieldValue::Str("python@python.ru".to_string()),
//!     )]),
//! };
//! store.insert(&template).unwrap();
//!
//! let fetched = store.get("EmailForm").unwrap().unwrap();
//! assert_eq!(fetched, template);
//! ```

mod backend;
pub mod mock;

#[cfg(feature = "backend-redb")]
pub use backend::RedbBackend;
pub use backend::{BackendConfig, InMemoryBackend, StoreBackend};

use engine::TemplateRecord;
use thiserror::Error;

/// Custom error type
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Template encode error: {0}")]
    Encode(String),
    #[error("Template decode error: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}

/// High-level template document store.
///
/// Handles JSON encoding and decoding so callers work with
/// [`TemplateRecord`] values while the backend only sees bytes.
pub struct TemplateStore {
    backend: Box<dyn StoreBackend>,
}

impl TemplateStore {
    /// Open a store using the configured backend.
    pub fn new(cfg: &BackendConfig) -> Result<Self, StoreError> {
        let backend = cfg.build()?;
        Ok(Self::with_backend(backend))
    }

    /// Build a store around a custom backend (e.g., in-memory for tests).
    pub fn with_backend(backend: Box<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Insert or update one template document, keyed by its name.
    pub fn insert(&self, template: &TemplateRecord) -> Result<(), StoreError> {
        let payload = encode_template(template)?;
        self.backend.put(&template.name, &payload)
    }

    /// Insert or update a batch of template documents in one backend
    /// write.
    pub fn insert_many(&self, templates: &[TemplateRecord]) -> Result<(), StoreError> {
        let mut entries = Vec::with_capacity(templates.len());
        for template in templates {
            entries.push((template.name.clone(), encode_template(template)?));
        }
        self.backend.batch_put(entries)
    }

    /// Retrieve a template document by name.
    pub fn get(&self, name: &str) -> Result<Option<TemplateRecord>, StoreError> {
        if let Some(data) = self.backend.get(name)? {
            let template = decode_template(&data)?;
            Ok(Some(template))
        } else {
            Ok(None)
        }
    }

    /// Remove a template document by name.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.backend.delete(name)
    }

    /// All stored template documents, in ascending name order.
    ///
    /// A document that fails to decode aborts the listing with an
    /// error; a store that returns garbage is a deployment fault, not
    /// something to paper over per-document.
    pub fn list(&self) -> Result<Vec<TemplateRecord>, StoreError> {
        let mut templates = Vec::new();
        self.backend.scan(&mut |data: &[u8]| {
            templates.push(decode_template(data)?);
            Ok(())
        })?;
        Ok(templates)
    }

    /// Number of stored template documents.
    pub fn count(&self) -> Result<usize, StoreError> {
        let mut count = 0usize;
        self.backend.scan(&mut |_| {
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }

    /// Flush backend buffers if supported.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.backend.flush()
    }
}

fn encode_template(template: &TemplateRecord) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(template).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode_template(data: &[u8]) -> Result<TemplateRecord, StoreError> {
    serde_json::from_slice(data).map_err(|e| StoreError::Decode(e.to_string()))
}
