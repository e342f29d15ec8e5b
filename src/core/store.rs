//! Progress store: the engine's view of persisted state.
//!
//! Layout (one blob per key):
//! - `gamificationData`: `{xp, level, achievements: [[id, state], ...],
//!   actions: [[key, record], ...], signals, lastUpdated}`
//! - `sessionHistory`: array of the most recent session summaries
//! - `visitCount`: integer string
//! - `hasVisitedBefore`: `"true"` once a first visit happened
//!
//! Reads never fail: missing or corrupt data yields defaults and a warning.
//! Writes report failure through the log and a `bool` return.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::achievements::types::{AchievementId, AchievementState, Signal};
use crate::core::constants::{
    FIRST_VISIT_KEY, PROGRESS_KEY, SESSION_HISTORY_KEY, VISIT_COUNT_KEY,
};
use crate::core::progression::level_for_xp;
use crate::core::record::{ActionRecord, ProgressRecord};
use crate::core::session::SessionSummary;
use crate::utils::persistence::{save_json, KeyValueStore, StorageError};

/// Unlock fields of a persisted achievement entry. Other fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAchievement {
    #[serde(default)]
    unlocked: bool,
    #[serde(default)]
    unlocked_at: Option<i64>,
}

/// Wire form of [`ProgressRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressBlob {
    #[serde(default)]
    xp: u64,
    #[serde(default)]
    level: u32,
    #[serde(default)]
    achievements: Vec<(String, StoredAchievement)>,
    #[serde(default)]
    actions: Vec<(String, ActionRecord)>,
    #[serde(default)]
    signals: BTreeMap<String, u64>,
    #[serde(default)]
    last_updated: i64,
}

impl ProgressBlob {
    fn from_record(record: &ProgressRecord) -> Self {
        Self {
            xp: record.xp,
            level: record.level,
            achievements: record
                .achievements
                .iter()
                .map(|(id, state)| {
                    (
                        id.key().to_string(),
                        StoredAchievement {
                            unlocked: state.unlocked,
                            unlocked_at: state.unlocked_at,
                        },
                    )
                })
                .collect(),
            actions: record
                .actions
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            signals: record
                .signals
                .iter()
                .map(|(s, count)| (s.key().to_string(), *count))
                .collect(),
            last_updated: record.last_updated,
        }
    }

    /// Unknown ids and signals are dropped; catalog entries missing from the
    /// blob stay locked. Level is recomputed from XP.
    fn into_record(self, thresholds: &[u64]) -> ProgressRecord {
        let mut record = ProgressRecord::fresh();
        record.xp = self.xp;
        record.level = level_for_xp(self.xp, thresholds);
        if self.level != 0 && self.level != record.level {
            warn!(
                stored = self.level,
                computed = record.level,
                "stored level disagrees with XP, using computed level"
            );
        }
        for (key, stored) in self.achievements {
            let Some(id) = AchievementId::from_key(&key) else {
                continue;
            };
            if stored.unlocked {
                record.achievements.insert(
                    id,
                    AchievementState {
                        id,
                        unlocked: true,
                        unlocked_at: stored.unlocked_at,
                    },
                );
            }
        }
        record.actions = self.actions.into_iter().collect();
        record.signals = self
            .signals
            .into_iter()
            .filter_map(|(key, count)| Signal::from_key(&key).map(|s| (s, count)))
            .collect();
        record.last_updated = self.last_updated;
        record
    }
}

/// Diagnostic dump of everything the store holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDump {
    pub gamification: serde_json::Value,
    pub sessions: Vec<SessionSummary>,
    pub visit_count: String,
}

/// Loads and saves engine state through a [`KeyValueStore`].
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
    history_limit: usize,
}

impl ProgressStore {
    pub fn new(backend: Box<dyn KeyValueStore>, history_limit: usize) -> Self {
        Self {
            backend,
            history_limit,
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read from storage");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "failed to write to storage");
                false
            }
        }
    }

    /// Load the progress record, falling back to a fresh one.
    pub fn load(&self, thresholds: &[u64]) -> ProgressRecord {
        let Some(json) = self.read(PROGRESS_KEY) else {
            return ProgressRecord::fresh();
        };
        match serde_json::from_str::<ProgressBlob>(&json) {
            Ok(blob) => blob.into_record(thresholds),
            Err(e) => {
                warn!(error = %e, "discarding corrupt progress data");
                ProgressRecord::fresh()
            }
        }
    }

    /// Persist the whole record under a single key.
    pub fn save(&mut self, record: &ProgressRecord) -> bool {
        match serde_json::to_string(&ProgressBlob::from_record(record)) {
            Ok(json) => self.write(PROGRESS_KEY, &json),
            Err(e) => {
                warn!(error = %e, "failed to encode progress data");
                false
            }
        }
    }

    /// Remove progress, session history and the visit counter.
    ///
    /// The first-visit flag survives, so a reset visitor is not welcomed twice.
    pub fn reset(&mut self) {
        for key in [PROGRESS_KEY, SESSION_HISTORY_KEY, VISIT_COUNT_KEY] {
            if let Err(e) = self.backend.remove(key) {
                warn!(key, error = %e, "failed to clear storage key");
            }
        }
    }

    pub fn visit_count(&self) -> u64 {
        self.read(VISIT_COUNT_KEY)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Bump the lifetime visit counter and return the new value.
    pub fn increment_visit_count(&mut self) -> u64 {
        let count = self.visit_count() + 1;
        self.write(VISIT_COUNT_KEY, &count.to_string());
        count
    }

    pub fn has_visited_before(&self) -> bool {
        self.read(FIRST_VISIT_KEY).as_deref() == Some("true")
    }

    pub fn mark_visited(&mut self) {
        self.write(FIRST_VISIT_KEY, "true");
    }

    pub fn session_history(&self) -> Vec<SessionSummary> {
        let Some(json) = self.read(SESSION_HISTORY_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(error = %e, "discarding corrupt session history");
            Vec::new()
        })
    }

    /// Append a summary, keeping only the most recent entries.
    pub fn append_session(&mut self, summary: SessionSummary) -> bool {
        let mut sessions = self.session_history();
        sessions.push(summary);
        if sessions.len() > self.history_limit {
            let excess = sessions.len() - self.history_limit;
            sessions.drain(..excess);
        }
        match serde_json::to_string(&sessions) {
            Ok(json) => self.write(SESSION_HISTORY_KEY, &json),
            Err(e) => {
                warn!(error = %e, "failed to encode session history");
                false
            }
        }
    }

    pub fn export(&self) -> ExportDump {
        let gamification = self
            .read(PROGRESS_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
        ExportDump {
            gamification,
            sessions: self.session_history(),
            visit_count: self.visit_count().to_string(),
        }
    }

    pub fn export_to_file(&self, path: &Path) -> Result<(), StorageError> {
        save_json(path, &self.export())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::LEVEL_THRESHOLDS;
    use crate::utils::persistence::MemoryStore;

    fn store_with(backend: &MemoryStore) -> ProgressStore {
        ProgressStore::new(Box::new(backend.clone()), 20)
    }

    #[test]
    fn test_load_missing_returns_fresh() {
        let backend = MemoryStore::new();
        let record = store_with(&backend).load(&LEVEL_THRESHOLDS);
        assert_eq!(record, ProgressRecord::fresh());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let backend = MemoryStore::new();
        let mut store = store_with(&backend);

        let mut record = ProgressRecord::fresh();
        record.xp = 260;
        record.level = 3;
        record.unlock(AchievementId::Explorer, 42);
        record.increment_signal(Signal::ContactForm);
        record.track_action("Page visit", 5, 42, "Mon Jan 05 2026");
        record.last_updated = 42;
        assert!(store.save(&record));

        let loaded = store.load(&LEVEL_THRESHOLDS);
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_corrupt_blob_yields_defaults() {
        let backend = MemoryStore::new();
        backend.insert_raw(PROGRESS_KEY, "{not json");
        let record = store_with(&backend).load(&LEVEL_THRESHOLDS);
        assert_eq!(record.xp, 0);
        assert_eq!(record.level, 1);
        assert_eq!(record.unlocked_count(), 0);
    }

    #[test]
    fn test_load_recomputes_level_and_skips_unknown_ids() {
        let backend = MemoryStore::new();
        backend.insert_raw(
            PROGRESS_KEY,
            r#"{"xp":500,"level":1,"achievements":[
                ["engaged",{"id":"engaged","title":"Engaged Visitor","unlocked":true,"unlockedAt":7}],
                ["retired-badge",{"unlocked":true,"unlockedAt":8}]
            ],"actions":[],"lastUpdated":9}"#,
        );
        let record = store_with(&backend).load(&LEVEL_THRESHOLDS);
        assert_eq!(record.level, 4);
        assert!(record.is_unlocked(AchievementId::Engaged));
        assert_eq!(record.unlocked_count(), 1);
        assert_eq!(record.achievements.len(), crate::achievements::ALL_ACHIEVEMENTS.len());
    }

    #[test]
    fn test_unavailable_storage_is_not_fatal() {
        let backend = MemoryStore::new();
        backend.set_failing(true);
        let mut store = store_with(&backend);
        assert!(!store.save(&ProgressRecord::fresh()));
        assert_eq!(store.load(&LEVEL_THRESHOLDS).xp, 0);
        assert_eq!(store.increment_visit_count(), 1);
        assert!(store.session_history().is_empty());
    }

    #[test]
    fn test_visit_counter_and_flag() {
        let backend = MemoryStore::new();
        let mut store = store_with(&backend);
        assert_eq!(store.visit_count(), 0);
        assert_eq!(store.increment_visit_count(), 1);
        assert_eq!(store.increment_visit_count(), 2);
        assert_eq!(backend.raw(VISIT_COUNT_KEY).as_deref(), Some("2"));

        assert!(!store.has_visited_before());
        store.mark_visited();
        assert!(store.has_visited_before());
    }

    #[test]
    fn test_session_history_is_capped() {
        let backend = MemoryStore::new();
        let mut store = store_with(&backend);
        for i in 0..25 {
            store.append_session(SessionSummary {
                duration: 1_000,
                sections_visited: vec![],
                interactions_count: i,
                timestamp: i as i64,
            });
        }
        let history = store.session_history();
        assert_eq!(history.len(), 20);
        assert_eq!(history[0].interactions_count, 5);
        assert_eq!(history[19].interactions_count, 24);
    }

    #[test]
    fn test_reset_keeps_first_visit_flag() {
        let backend = MemoryStore::new();
        let mut store = store_with(&backend);
        store.save(&ProgressRecord::fresh());
        store.increment_visit_count();
        store.mark_visited();
        store.append_session(SessionSummary {
            duration: 1,
            sections_visited: vec![],
            interactions_count: 0,
            timestamp: 1,
        });

        store.reset();
        assert_eq!(backend.raw(PROGRESS_KEY), None);
        assert_eq!(backend.raw(SESSION_HISTORY_KEY), None);
        assert_eq!(store.visit_count(), 0);
        assert!(store.has_visited_before());
    }

    #[test]
    fn test_export() {
        let backend = MemoryStore::new();
        let mut store = store_with(&backend);
        let empty = store.export();
        assert_eq!(empty.gamification, serde_json::json!({}));
        assert_eq!(empty.visit_count, "0");

        let mut record = ProgressRecord::fresh();
        record.xp = 10;
        store.save(&record);
        store.increment_visit_count();
        let dump = store.export();
        assert_eq!(dump.gamification["xp"], 10);
        assert_eq!(dump.visit_count, "1");

        let json = serde_json::to_value(&dump).unwrap();
        assert!(json.get("visitCount").is_some());
    }
}
