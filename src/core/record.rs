//! Persistent progress record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::achievements::data::ALL_ACHIEVEMENTS;
use crate::achievements::types::{AchievementId, AchievementState, Signal};

/// Audit entry for one action on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub action: String,
    pub count: u64,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub first_occurrence: i64,
    #[serde(default)]
    pub last_occurrence: Option<i64>,
}

/// Everything the engine persists between visits.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub xp: u64,
    pub level: u32,
    /// One entry per catalog achievement.
    pub achievements: BTreeMap<AchievementId, AchievementState>,
    /// Keyed by `"{action}_{day}"`.
    pub actions: BTreeMap<String, ActionRecord>,
    /// Lifetime counters for discrete page signals.
    pub signals: BTreeMap<Signal, u64>,
    pub last_updated: i64,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self::fresh()
    }
}

impl ProgressRecord {
    /// Level 1, no XP, every achievement locked.
    pub fn fresh() -> Self {
        Self {
            xp: 0,
            level: 1,
            achievements: ALL_ACHIEVEMENTS
                .iter()
                .map(|def| (def.id, AchievementState::locked(def.id)))
                .collect(),
            actions: BTreeMap::new(),
            signals: BTreeMap::new(),
            last_updated: 0,
        }
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements
            .get(&id)
            .map(|state| state.unlocked)
            .unwrap_or(false)
    }

    /// Unlock `id` at `timestamp`. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId, timestamp: i64) -> bool {
        self.achievements
            .entry(id)
            .or_insert_with(|| AchievementState::locked(id))
            .unlock(timestamp)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.values().filter(|s| s.unlocked).count()
    }

    /// Unlocked states in catalog order.
    pub fn unlocked_states(&self) -> Vec<&AchievementState> {
        self.achievements.values().filter(|s| s.unlocked).collect()
    }

    /// Add one occurrence of `action` worth `xp` to the day's audit entry.
    pub fn track_action(&mut self, action: &str, xp: u64, timestamp: i64, day: &str) {
        let key = format!("{}_{}", action, day);
        let entry = self.actions.entry(key).or_insert_with(|| ActionRecord {
            action: action.to_string(),
            count: 0,
            total_xp: 0,
            first_occurrence: timestamp,
            last_occurrence: None,
        });
        entry.count += 1;
        entry.total_xp += xp;
        entry.last_occurrence = Some(timestamp);
    }

    pub fn signal_count(&self, signal: Signal) -> u64 {
        self.signals.get(&signal).copied().unwrap_or(0)
    }

    /// Bump a signal counter and return the new count.
    pub fn increment_signal(&mut self, signal: Signal) -> u64 {
        let count = self.signals.entry(signal).or_insert(0);
        *count += 1;
        *count
    }
}
