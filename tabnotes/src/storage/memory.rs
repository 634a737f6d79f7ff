//! In-memory storage.
use super::KeyValueStorage;
use crate::errors::StorageError;
use std::collections::HashMap;

/// In-memory key-value storage.
///
/// Nothing survives the process, so this is mostly useful for tests and for embedding the
/// manager where the host provides its own durability.
/// An optional quota mimics the size limit of browser storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Default::default()
    }

    /// Storage that refuses writes once keys and values together exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStorage {
            quota: Some(quota),
            ..Default::default()
        }
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn size_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.size_with(key, value);
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    quota,
                });
            }
        }
        self.items.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests as common_tests;

    #[test]
    fn missing_key() {
        common_tests::missing_key(MemoryStorage::new());
    }

    #[test]
    fn set_and_get() {
        common_tests::set_and_get(MemoryStorage::new());
    }

    #[test]
    fn overwrite() {
        common_tests::overwrite(MemoryStorage::new());
    }

    #[test]
    fn remove() {
        common_tests::remove(MemoryStorage::new());
    }

    #[test]
    fn notes_round_trip() {
        common_tests::notes_round_trip(MemoryStorage::new());
    }

    #[test]
    fn malformed_notes_read_as_absent() {
        common_tests::malformed_notes_read_as_absent(MemoryStorage::new());
    }

    #[test]
    fn quota_refuses_large_write() {
        let mut storage = MemoryStorage::with_quota(16);
        storage.set_item("k", "small").unwrap();
        let err = storage.set_item("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("small"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set_item("key", "1234567").unwrap();
        storage.set_item("key", "7654321").unwrap();
    }
}
