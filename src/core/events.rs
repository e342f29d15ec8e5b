//! Notifications produced by the engine.
//!
//! The presentation layer drains these with [`Engine::take_events`] and maps
//! them to toasts, XP bar updates and sounds. The engine never touches
//! presentation types.
//!
//! [`Engine::take_events`]: crate::core::engine::Engine::take_events

use crate::achievements::types::AchievementId;
use crate::core::session::SessionSummary;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// XP was added to the total.
    XpGained {
        amount: u64,
        reason: String,
        total_xp: u64,
    },

    /// Level increased; `bonus_xp` is scheduled, not yet applied.
    LevelUp {
        old_level: u32,
        new_level: u32,
        bonus_xp: u64,
    },

    /// Achievement unlocked; its reward is scheduled, not yet applied.
    AchievementUnlocked {
        id: AchievementId,
        title: &'static str,
        icon: &'static str,
        xp_reward: u64,
    },

    SessionStarted { visit_count: u64 },

    SessionEnded { summary: SessionSummary },

    /// All progress was wiped.
    ProgressReset,
}
