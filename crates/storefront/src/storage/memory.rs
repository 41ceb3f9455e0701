//! In-memory storage backend.

use std::collections::HashMap;

use super::{KeyValueStore, StorageError, check_quota};

/// Process-local key-value store.
///
/// `set_available(false)` simulates a backend that refuses every operation
/// (private browsing, disabled storage).
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    quota: Option<usize>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            quota: None,
            available: true,
        }
    }

    /// Create an empty store that rejects values above `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::new()
        }
    }

    /// Toggle whether the backend accepts reads and writes.
    pub const fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Raw slot content, bypassing availability checks.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of populated slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_available()?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        check_quota(value, self.quota)?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
