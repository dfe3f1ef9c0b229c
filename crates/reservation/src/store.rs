//! Durable local store port.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Store key holding the serialized reservation set.
///
/// Kept byte-compatible with the blob written by earlier versions of the
/// configurator so existing holds survive an upgrade.
pub const RESERVATIONS_KEY: &str = "selectedResources";

/// Errors from the durable local store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),
}

/// Scoped key-value persistence capability.
///
/// Both operations are synchronous from the caller's point of view; values
/// are opaque strings (the manager serializes/deserializes around them).
pub trait ReservationStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile in-process store. Useful for tests and short-lived sessions;
/// nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_of_missing_key_is_none() {
        let store = InMemoryStore::new();
        assert!(store.read("absent").unwrap().is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let store = InMemoryStore::new();
        store.write(RESERVATIONS_KEY, "[]").unwrap();
        assert_eq!(store.read(RESERVATIONS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn write_overwrites_previous_value() {
        let store = InMemoryStore::new();
        store.write("k", "one").unwrap();
        store.write("k", "two").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("two"));
    }
}
