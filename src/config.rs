//! Engine configuration.
//!
//! Every field defaults to the values in [`crate::core::constants`]. A JSON
//! file (`~/.legend/config.json`) may override any subset of them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::core::constants::*;
use crate::utils::persistence::load_json_or_default;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("level threshold table is empty")]
    EmptyThresholds,

    #[error("first level threshold must be 0, got {0}")]
    NonZeroFirstThreshold(u64),

    #[error("level thresholds must be strictly increasing (index {index}: {value} after {previous})")]
    NonIncreasingThresholds {
        index: usize,
        previous: u64,
        value: u64,
    },

    #[error("session history limit must be at least 1")]
    EmptySessionHistory,

    #[error("{0} must be greater than 0")]
    ZeroInterval(&'static str),
}

/// XP granted for each kind of action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XpValues {
    pub page_visit: u64,
    pub navigation: u64,
    pub section_view: u64,
    pub project_view: u64,
    pub gallery_view: u64,
    pub quote_view: u64,
    pub quote_share: u64,
    pub cta_click: u64,
    pub contact_form: u64,
    pub newsletter_signup: u64,
    pub social_share: u64,
    pub gallery_filter: u64,
    pub interaction: u64,
    pub time_milestone: u64,
    pub explorer_bonus: u64,
    pub long_session_bonus: u64,
    pub level_up_bonus_per_level: u64,
}

impl Default for XpValues {
    fn default() -> Self {
        Self {
            page_visit: XP_PAGE_VISIT,
            navigation: XP_NAVIGATION,
            section_view: XP_SECTION_VIEW,
            project_view: XP_PROJECT_VIEW,
            gallery_view: XP_GALLERY_VIEW,
            quote_view: XP_QUOTE_VIEW,
            quote_share: XP_QUOTE_SHARE,
            cta_click: XP_CTA_CLICK,
            contact_form: XP_CONTACT_FORM,
            newsletter_signup: XP_NEWSLETTER_SIGNUP,
            social_share: XP_SOCIAL_SHARE,
            gallery_filter: XP_GALLERY_FILTER,
            interaction: XP_INTERACTION,
            time_milestone: XP_TIME_MILESTONE,
            explorer_bonus: XP_EXPLORER_BONUS,
            long_session_bonus: XP_LONG_SESSION_BONUS,
            level_up_bonus_per_level: LEVEL_UP_BONUS_PER_LEVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Ascending XP thresholds; level N starts at entry N - 1.
    pub level_thresholds: Vec<u64>,
    pub xp: XpValues,
    /// Delay before achievement and level-up bonuses are granted.
    pub bonus_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub time_milestone_ms: u64,
    pub long_session_ms: u64,
    pub session_history_limit: usize,
    /// Sections the page renders. Empty means only the catalog's own
    /// section list counts for the explorer achievement.
    pub page_sections: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level_thresholds: LEVEL_THRESHOLDS.to_vec(),
            xp: XpValues::default(),
            bonus_delay_ms: BONUS_DELAY_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            time_milestone_ms: TIME_MILESTONE_MS,
            long_session_ms: LONG_SESSION_MS,
            session_history_limit: SESSION_HISTORY_LIMIT,
            page_sections: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let first = *self
            .level_thresholds
            .first()
            .ok_or(ConfigError::EmptyThresholds)?;
        if first != 0 {
            return Err(ConfigError::NonZeroFirstThreshold(first));
        }
        for (index, pair) in self.level_thresholds.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::NonIncreasingThresholds {
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }
        if self.session_history_limit == 0 {
            return Err(ConfigError::EmptySessionHistory);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("tickIntervalMs"));
        }
        if self.time_milestone_ms == 0 {
            return Err(ConfigError::ZeroInterval("timeMilestoneMs"));
        }
        Ok(())
    }

    /// Load from a JSON file. Missing, unreadable or invalid configuration
    /// falls back to the defaults.
    pub fn load(path: &Path) -> Self {
        let config: EngineConfig = load_json_or_default(path);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid configuration, using defaults");
                EngineConfig::default()
            }
        }
    }
}
