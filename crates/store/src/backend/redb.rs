//! Redb (Rust embedded database) backend for template document storage.
//!
//! Redb is a pure Rust embedded key-value store with ACID transactions
//! and no external dependencies, which keeps single-binary deployments
//! simple. Keys iterate in ascending order, so `scan` satisfies the
//! ordered-enumeration contract without extra work.

use crate::{StoreBackend, StoreError};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Table holding one JSON-encoded template document per template name.
const TEMPLATES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("templates");

/// Redb backend for persistent template storage.
///
/// The `Arc<Database>` wrapper allows safe sharing across threads; redb
/// handles its own internal locking and MVCC.
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Open or create a Redb database at the given path.
    ///
    /// # Example
    /// ```no_run
    /// use store::RedbBackend;
    ///
    /// let backend = RedbBackend::open("/tmp/formcheck.redb").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(|e| StoreError::backend(e.to_string()))?;

        // Opening the table once inside a write transaction creates it,
        // so later read transactions never see a missing table.
        let write_txn = db
            .begin_write()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TEMPLATES_TABLE)
                .map_err(|e| StoreError::backend(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::backend(e.to_string()))?;

        tracing::info!(path = %path.display(), "template database opened");

        Ok(Self { db: Arc::new(db) })
    }
}

impl StoreBackend for RedbBackend {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::backend(e.to_string()))?;

        {
            let mut table = write_txn
                .open_table(TEMPLATES_TABLE)
                .map_err(|e| StoreError::backend(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| StoreError::backend(e.to_string()))?;
        }

        write_txn
            .commit()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        let table = read_txn
            .open_table(TEMPLATES_TABLE)
            .map_err(|e| StoreError::backend(e.to_string()))?;

        match table
            .get(key)
            .map_err(|e| StoreError::backend(e.to_string()))?
        {
            Some(value) => Ok(Some(value.value().to_vec())),
            None => Ok(None),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::backend(e.to_string()))?;

        {
            let mut table = write_txn
                .open_table(TEMPLATES_TABLE)
                .map_err(|e| StoreError::backend(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| StoreError::backend(e.to_string()))?;
        }

        write_txn
            .commit()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        Ok(())
    }

    fn batch_put(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), StoreError> {
        // All entries land in one transaction, so a seed is atomic.
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::backend(e.to_string()))?;

        {
            let mut table = write_txn
                .open_table(TEMPLATES_TABLE)
                .map_err(|e| StoreError::backend(e.to_string()))?;

            for (key, value) in entries {
                table
                    .insert(key.as_str(), value.as_slice())
                    .map_err(|e| StoreError::backend(e.to_string()))?;
            }
        }

        write_txn
            .commit()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        Ok(())
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        let table = read_txn
            .open_table(TEMPLATES_TABLE)
            .map_err(|e| StoreError::backend(e.to_string()))?;

        for item in table
            .iter()
            .map_err(|e| StoreError::backend(e.to_string()))?
        {
            let (_, value) = item.map_err(|e| StoreError::backend(e.to_string()))?;
            visitor(value.value())?;
        }

        Ok(())
    }

    fn flush(&self) -> Result<(), StoreError> {
        // Redb commits are synchronous, so flush is a no-op.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_redb_backend_roundtrip() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        backend.put("EmailForm", b"{\"name\":\"EmailForm\"}").unwrap();
        let result = backend.get("EmailForm").unwrap();
        assert_eq!(result, Some(b"{\"name\":\"EmailForm\"}".to_vec()));

        let result = backend.get("NoSuchForm").unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_redb_backend_batch() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        let entries = vec![
            ("EmailForm".to_string(), b"email".to_vec()),
            ("PhoneForm".to_string(), b"phone".to_vec()),
            ("DateForm".to_string(), b"date".to_vec()),
        ];

        backend.batch_put(entries).unwrap();

        assert_eq!(backend.get("EmailForm").unwrap(), Some(b"email".to_vec()));
        assert_eq!(backend.get("PhoneForm").unwrap(), Some(b"phone".to_vec()));
        assert_eq!(backend.get("DateForm").unwrap(), Some(b"date".to_vec()));
    }

    #[test]
    fn test_redb_backend_delete() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        backend.put("EmailForm", b"email").unwrap();
        assert_eq!(backend.get("EmailForm").unwrap(), Some(b"email".to_vec()));

        backend.delete("EmailForm").unwrap();
        assert_eq!(backend.get("EmailForm").unwrap(), None);
    }

    #[test]
    fn test_redb_backend_scan_is_key_ordered() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        backend.put("PhoneForm", b"phone").unwrap();
        backend.put("EmailForm", b"email").unwrap();

        let mut collected = Vec::new();
        backend
            .scan(&mut |value| {
                collected.push(value.to_vec());
                Ok(())
            })
            .unwrap();

        // "EmailForm" sorts before "PhoneForm".
        assert_eq!(collected, vec![b"email".to_vec(), b"phone".to_vec()]);
    }
}
