//! Per-session activity tracking.
//!
//! A session lives from page load to teardown. Nothing here is persisted
//! directly; a [`SessionSummary`] is appended to the session history when
//! the session ends.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// In-memory statistics for the current session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub start_time: i64,
    /// Local hour-of-day when the session started.
    pub start_hour: u32,
    pub sections_visited: BTreeSet<String>,
    pub interactions_count: u64,
    /// Foreground milliseconds accumulated so far.
    pub time_spent_ms: u64,
    #[serde(skip)]
    pub visible: bool,
}

impl SessionStats {
    pub fn new(start_time: i64, start_hour: u32) -> Self {
        Self {
            start_time,
            start_hour,
            sections_visited: BTreeSet::new(),
            interactions_count: 0,
            time_spent_ms: 0,
            visible: true,
        }
    }

    /// Record a section. Returns true the first time a section is seen.
    pub fn visit_section(&mut self, section_id: &str) -> bool {
        self.sections_visited.insert(section_id.to_string())
    }

    pub fn record_interaction(&mut self) -> u64 {
        self.interactions_count += 1;
        self.interactions_count
    }

    /// Add foreground time and return how many `milestone_ms` boundaries
    /// were crossed.
    pub fn add_active_time(&mut self, ms: u64, milestone_ms: u64) -> u64 {
        let before = self.time_spent_ms;
        self.time_spent_ms = self.time_spent_ms.saturating_add(ms);
        if milestone_ms == 0 {
            return 0;
        }
        self.time_spent_ms / milestone_ms - before / milestone_ms
    }

    pub fn time_spent_minutes(&self) -> f64 {
        self.time_spent_ms as f64 / 60_000.0
    }

    /// Wall-clock duration since the session started.
    pub fn duration_ms(&self, now: i64) -> u64 {
        now.saturating_sub(self.start_time).max(0) as u64
    }

    pub fn summary(&self, now: i64) -> SessionSummary {
        SessionSummary {
            duration: self.duration_ms(now),
            sections_visited: self.sections_visited.iter().cloned().collect(),
            interactions_count: self.interactions_count,
            timestamp: now,
        }
    }
}

/// One entry of the persisted session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub duration: u64,
    #[serde(default)]
    pub sections_visited: Vec<String>,
    #[serde(default)]
    pub interactions_count: u64,
    pub timestamp: i64,
}
