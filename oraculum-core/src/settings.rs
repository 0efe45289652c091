//! Local key-value settings storage.
//!
//! [`SettingsStore`] is the swappable backend (a JSON file on disk, or memory
//! in tests). [`load_json`]/[`save_json`] add the JSON codec with default
//! fallback, and [`ThresholdStore`] binds the threshold pair to its key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::StoreError;
use crate::thresholds::Thresholds;

/// Key under which the threshold pair is persisted.
pub const THRESHOLDS_KEY: &str = "oraculumThresholds";

/// Raw key-value capability.
pub trait SettingsStore: Send {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Decode the value under `key`, falling back to `T::default()` when it is
/// absent or malformed. Never fails.
pub fn load_json<T>(store: &dyn SettingsStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        None => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(key, error = %e, "malformed setting, using defaults");
            T::default()
        }),
    }
}

pub fn save_json<T: Serialize>(
    store: &mut dyn SettingsStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_value(value)?)
}

/// All settings in one JSON object file. Missing or corrupt files read as empty.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "corrupt settings file, ignoring");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    /// Writes through to disk synchronously.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Threshold persistence under [`THRESHOLDS_KEY`].
pub struct ThresholdStore {
    store: Box<dyn SettingsStore>,
}

impl ThresholdStore {
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Restore the saved pair. Absent or malformed values give the defaults;
    /// a saved pair that breaks `sell < buy` is re-clamped with a warning.
    pub fn load(&self) -> Thresholds {
        if let Some(Value::Object(raw)) = self.store.get(THRESHOLDS_KEY) {
            let sell = raw.get("sell").and_then(Value::as_f64);
            let buy = raw.get("buy").and_then(Value::as_f64);
            if let (Some(s), Some(b)) = (sell, buy) {
                if s >= b {
                    warn!(sell = s, buy = b, "saved thresholds out of order, re-clamping");
                }
            }
        }
        load_json(self.store.as_ref(), THRESHOLDS_KEY)
    }

    pub fn save(&mut self, thresholds: &Thresholds) -> Result<(), StoreError> {
        save_json(self.store.as_mut(), THRESHOLDS_KEY, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut thresholds = Thresholds::default();
        thresholds.set_sell(30.0);
        thresholds.set_buy(80.0);

        let mut store = ThresholdStore::new(Box::new(JsonFileStore::open(&path)));
        store.save(&thresholds).unwrap();

        let reopened = ThresholdStore::new(Box::new(JsonFileStore::open(&path)));
        assert_eq!(reopened.load(), thresholds);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let store = ThresholdStore::new(Box::new(JsonFileStore::open(
            "/nonexistent/oraculum/settings.json",
        )));
        assert_eq!(store.load(), Thresholds::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let store = ThresholdStore::new(Box::new(JsonFileStore::open(&path)));
        assert_eq!(store.load(), Thresholds::default());
    }

    #[test]
    fn malformed_value_gives_defaults() {
        let mut mem = MemoryStore::new();
        mem.set(THRESHOLDS_KEY, json!("sell=10")).unwrap();
        let store = ThresholdStore::new(Box::new(mem));
        assert_eq!(store.load(), Thresholds::default());
    }

    #[test]
    fn inverted_saved_pair_is_reclamped() {
        let mut mem = MemoryStore::new();
        mem.set(THRESHOLDS_KEY, json!({"sell": 75, "buy": 20})).unwrap();
        let t = ThresholdStore::new(Box::new(mem)).load();
        assert_eq!((t.sell(), t.buy()), (75, 76));
    }

    #[test]
    fn other_keys_survive_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = JsonFileStore::open(&path);
        store.set("other", json!(1)).unwrap();
        save_json(&mut store, THRESHOLDS_KEY, &Thresholds::default()).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("other"), Some(json!(1)));
        assert_eq!(
            reopened.get(THRESHOLDS_KEY),
            Some(json!({"sell": 40, "buy": 70}))
        );
    }
}
