//! Durable key-value store seam
//!
//! Mirrors the browser `localStorage` contract: string keys, string values,
//! whole-value overwrite.

use std::collections::BTreeMap;

use crate::error::Result;

/// A synchronous string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used by tests and for sessions that should not persist
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to seed a raw value
    #[cfg(test)]
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_overwrites() {
        let mut store = MemoryStore::new();
        assert!(store.get_item("tasks").unwrap().is_none());

        store.set_item("tasks", "[]").unwrap();
        store.set_item("tasks", "[1]").unwrap();

        assert_eq!(store.get_item("tasks").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_borrowed_store_writes_through() {
        fn write<S: KeyValueStore>(mut store: S) {
            store.set_item("k", "v").unwrap();
        }

        let mut store = MemoryStore::new();
        write(&mut store);
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
