//! Persisted scalar key-value store
//!
//! The platform analogue of player preferences: simple scalars by string
//! key, read and written only at session boundaries (start, stage
//! advance), never in the per-tick hot path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Well-known keys
pub const LAST_LEVEL_KEY: &str = "LastLevel";
pub const VOLUME_KEY: &str = "Volume";
pub const VIBRATION_KEY: &str = "Vibration";

/// Scalar key-value persistence with per-call defaults
pub trait PrefsStore {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&mut self, key: &str, value: &str);
    fn get_float(&self, key: &str, default: f32) -> f32;
    fn set_float(&mut self, key: &str, value: f32);
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn set_int(&mut self, key: &str, value: i32);
    fn has_key(&self, key: &str) -> bool;
    fn remove(&mut self, key: &str);
    /// Wipe everything (the end-screen reset)
    fn clear_all(&mut self);
}

/// One stored scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Str(String),
    // Int before Float so untagged snapshots keep integers integral
    Int(i32),
    Float(f32),
}

/// In-memory store with a JSON snapshot for host-side persistence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryPrefs {
    values: HashMap<String, PrefValue>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the whole store; the host decides where it lands
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Restore a snapshot, falling back to an empty store on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(store) => store,
            Err(err) => {
                log::warn!("prefs snapshot unreadable ({err}), starting fresh");
                Self::new()
            }
        }
    }
}

impl PrefsStore for MemoryPrefs {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(PrefValue::Str(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), PrefValue::Str(value.to_string()));
    }

    fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.values.get(key) {
            Some(PrefValue::Float(v)) => *v,
            Some(PrefValue::Int(v)) => *v as f32,
            _ => default,
        }
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), PrefValue::Float(value));
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.values.get(key) {
            Some(PrefValue::Int(v)) => *v,
            _ => default,
        }
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), PrefValue::Int(value));
    }

    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear_all(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let prefs = MemoryPrefs::new();
        assert_eq!(prefs.get_string(LAST_LEVEL_KEY, "Level1"), "Level1");
        assert_eq!(prefs.get_float(VOLUME_KEY, 1.0), 1.0);
        assert_eq!(prefs.get_int(VIBRATION_KEY, 1), 1);
        assert!(!prefs.has_key(LAST_LEVEL_KEY));
    }

    #[test]
    fn test_set_get_and_clear() {
        let mut prefs = MemoryPrefs::new();
        prefs.set_string(LAST_LEVEL_KEY, "Level3");
        prefs.set_float(VOLUME_KEY, 0.4);
        prefs.set_int(VIBRATION_KEY, 0);

        assert_eq!(prefs.get_string(LAST_LEVEL_KEY, "Level1"), "Level3");
        assert_eq!(prefs.get_float(VOLUME_KEY, 1.0), 0.4);
        assert_eq!(prefs.get_int(VIBRATION_KEY, 1), 0);

        prefs.clear_all();
        assert!(!prefs.has_key(LAST_LEVEL_KEY));
        assert_eq!(prefs.get_float(VOLUME_KEY, 1.0), 1.0);
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let mut prefs = MemoryPrefs::new();
        prefs.set_string(LAST_LEVEL_KEY, "Level2");
        prefs.set_float(VOLUME_KEY, 0.7);

        let restored = MemoryPrefs::from_json(&prefs.to_json());
        assert_eq!(restored.get_string(LAST_LEVEL_KEY, ""), "Level2");
        assert_eq!(restored.get_float(VOLUME_KEY, 0.0), 0.7);
    }

    #[test]
    fn test_bad_snapshot_starts_fresh() {
        let prefs = MemoryPrefs::from_json("not json at all");
        assert!(!prefs.has_key(LAST_LEVEL_KEY));
    }
}
