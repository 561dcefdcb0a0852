//! Typed JSON bridge over a [`KeyValueStore`].

use super::{KeyValueStore, StorageResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON save/load facade that absorbs every storage failure.
pub struct PersistentBridge<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistentBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serializes `value` and writes it under `key`.
    ///
    /// Returns `true` when the write landed. Failures are logged at `warn`
    /// and otherwise ignored.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match self.try_save(key, value) {
            Ok(bytes) => {
                debug!("event=kv_save module=kv status=ok key={key} bytes={bytes}");
                true
            }
            Err(err) => {
                warn!("event=kv_save module=kv status=error key={key} error={err}");
                false
            }
        }
    }

    /// Reads and decodes the value at `key`, or returns `fallback`.
    ///
    /// Absent keys, empty strings, malformed JSON, shape mismatches and
    /// storage errors all yield `fallback` unchanged.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return fallback,
            Err(err) => {
                warn!("event=kv_load module=kv status=error key={key} error={err}");
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=kv_load module=kv status=fallback key={key} error={err}");
                fallback
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn try_save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StorageResult<usize> {
        let json = serde_json::to_string(value)?;
        self.store.set_item(key, &json)?;
        Ok(json.len())
    }
}

#[cfg(test)]
mod tests {
    use super::PersistentBridge;
    use crate::kv::{KeyValueStore, MemoryKeyValueStore};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn load_returns_fallback_for_missing_empty_or_malformed_entries() {
        let mut store = MemoryKeyValueStore::new();
        store.set_item("empty", "").unwrap();
        store.set_item("broken", "{not json").unwrap();
        store.set_item("wrong_shape", r#"{"name":1}"#).unwrap();
        let bridge = PersistentBridge::new(store);

        assert_eq!(bridge.load("missing", vec![7u8]), vec![7u8]);
        assert_eq!(bridge.load("empty", 3i32), 3);
        assert_eq!(bridge.load("broken", 5i32), 5);
        assert_eq!(
            bridge.load(
                "wrong_shape",
                Sample {
                    name: "fallback".to_string(),
                    count: 0
                }
            ),
            Sample {
                name: "fallback".to_string(),
                count: 0
            }
        );
    }

    #[test]
    fn save_then_load_returns_saved_value() {
        let mut bridge = PersistentBridge::new(MemoryKeyValueStore::new());
        let value = Sample {
            name: "Raven".to_string(),
            count: 2,
        };
        assert!(bridge.save("sample", &value));

        let loaded: Sample = bridge.load(
            "sample",
            Sample {
                name: String::new(),
                count: 0,
            },
        );
        assert_eq!(loaded, value);
    }

    #[test]
    fn save_absorbs_quota_failures() {
        let mut bridge = PersistentBridge::new(MemoryKeyValueStore::with_quota(8));
        assert!(!bridge.save("cn_articles", &vec!["far too large to fit"]));
        assert!(bridge.store().is_empty());
        assert_eq!(bridge.load::<Option<String>>("cn_articles", None), None);
    }
}
