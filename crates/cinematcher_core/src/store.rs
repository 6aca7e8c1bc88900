//! crates/cinematcher_core/src/store.rs
//!
//! Loads and saves the watchlist and history as JSON documents in a
//! `KeyValueStore`. Reading never fails: a missing or unreadable entry is an
//! empty collection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{MatchResult, Recommendation};
use crate::ports::{KeyValueStore, PortError, PortResult};

pub const WATCHLIST_KEY: &str = "cineMatcher_watchlist";
pub const HISTORY_KEY: &str = "cineMatcher_history";

/// Typed access to the two persisted collections.
#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn KeyValueStore>,
}

impl StateStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn load_watchlist(&self) -> Vec<Recommendation> {
        self.load_or_default(WATCHLIST_KEY)
    }

    pub fn load_history(&self) -> Vec<MatchResult> {
        self.load_or_default(HISTORY_KEY)
    }

    pub fn save_watchlist(&self, watchlist: &[Recommendation]) -> PortResult<()> {
        self.save(WATCHLIST_KEY, watchlist)
    }

    pub fn save_history(&self, history: &[MatchResult]) -> PortResult<()> {
        self.save(HISTORY_KEY, history)
    }

    pub fn remove_history(&self) -> PortResult<()> {
        self.backend.remove(HISTORY_KEY)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "Nothing saved yet");
                return T::default();
            }
            Err(e) => {
                warn!(key, error = %e, "Could not read saved state, starting empty");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "Saved state is not valid JSON, starting empty");
            T::default()
        })
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PortResult<()> {
        let encoded =
            serde_json::to_string(value).map_err(|e| PortError::Store(e.to_string()))?;
        self.backend.set(key, &encoded)
    }
}

/// A `KeyValueStore` kept in memory, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> PortResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| PortError::Store("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{match_result, recommendation};

    fn store() -> (Arc<MemoryStore>, StateStore) {
        let backend = Arc::new(MemoryStore::new());
        (backend.clone(), StateStore::new(backend))
    }

    #[test]
    fn watchlist_survives_a_save_and_load() {
        let (_, store) = store();
        let watchlist = vec![recommendation("Heat"), recommendation("Alien")];

        store.save_watchlist(&watchlist).unwrap();

        assert_eq!(store.load_watchlist(), watchlist);
    }

    #[test]
    fn missing_keys_load_as_empty() {
        let (_, store) = store();
        assert!(store.load_watchlist().is_empty());
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn corrupt_values_load_as_empty() {
        let (backend, store) = store();
        backend.set(WATCHLIST_KEY, "not json").unwrap();
        backend.set(HISTORY_KEY, "{\"recommendations\": 3}").unwrap();

        assert!(store.load_watchlist().is_empty());
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn removed_history_loads_as_empty() {
        let (backend, store) = store();
        store.save_history(&[match_result("a")]).unwrap();

        store.remove_history().unwrap();

        assert_eq!(backend.get(HISTORY_KEY).unwrap(), None);
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn persisted_layout_uses_the_wire_names() {
        let (backend, store) = store();
        store.save_watchlist(&[recommendation("Heat")]).unwrap();

        let raw = backend.get(WATCHLIST_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["technicalDetails"]["director"], "Ridley Scott");
        assert_eq!(value[0]["type"], "Film");
    }
}
