//! Progression engine: the single writer of progress and session state.
//!
//! Page components report what the visitor did (`record_section_view`,
//! `record_interaction`, `record_signal`, `add_xp`, ...). The engine updates
//! XP and level, runs the rule evaluator, persists after every mutation and
//! queues [`EngineEvent`]s for the presentation layer.
//!
//! Achievement rewards and level-up bonuses are deferred by
//! `bonus_delay_ms` and granted from [`Engine::tick`] or
//! [`Engine::run_due_tasks`]. A level-up bonus goes back through
//! [`Engine::add_xp`] and may itself level up; this chain is bounded because
//! the threshold table is finite and strictly increasing.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;
use tracing::{debug, info};

use crate::achievements::data::{get_achievement_def, ALL_ACHIEVEMENTS};
use crate::achievements::evaluator::{evaluate, EvaluationContext, Trigger};
use crate::achievements::types::{AchievementId, AchievementState, Signal};
use crate::config::{EngineConfig, XpValues};
use crate::core::clock::{Clock, SystemClock};
use crate::core::events::EngineEvent;
use crate::core::progression::{level_for_xp, progress_to_next_level, xp_to_next_level};
use crate::core::record::ProgressRecord;
use crate::core::scheduler::{DeferredGrant, Scheduler};
use crate::core::session::{SessionStats, SessionSummary};
use crate::core::store::{ExportDump, ProgressStore};
use crate::utils::persistence::KeyValueStore;

/// Read-only snapshot for progress displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub xp: u64,
    pub level: u32,
    /// Percent of the way to the next level, `[0, 100]`.
    pub progress_percent: f64,
    /// `None` at the top level.
    pub xp_to_next_level: Option<u64>,
    pub time_spent_minutes: f64,
    /// Unlocked achievements only.
    pub achievements: Vec<AchievementState>,
    pub session: SessionStats,
}

pub struct Engine {
    config: EngineConfig,
    store: ProgressStore,
    record: ProgressRecord,
    session: SessionStats,
    scheduler: Scheduler,
    clock: Box<dyn Clock>,
    events: Vec<EngineEvent>,
    visit_count: u64,
    first_visit: bool,
}

/// Calendar-day part of an action-log key, e.g. `Mon Jan 05 2026`.
fn day_key(now: &DateTime<FixedOffset>) -> String {
    now.format("%a %b %d %Y").to_string()
}

/// XP and log reason for a signal, if the signal is worth XP by itself.
fn signal_reward(xp: &XpValues, signal: Signal) -> Option<(u64, &'static str)> {
    match signal {
        Signal::ContactForm => Some((xp.contact_form, "Contact Form Submission")),
        Signal::Newsletter => Some((xp.newsletter_signup, "Newsletter Signup")),
        Signal::SocialLink | Signal::PortfolioShared => Some((xp.social_share, "Social Share")),
        Signal::QuoteShared => Some((xp.quote_share, "Quote Share")),
        Signal::ProjectView => Some((xp.project_view, "Project View")),
        Signal::QuoteView => Some((xp.quote_view, "Quote View")),
        Signal::GalleryItem => Some((xp.gallery_view, "Gallery View")),
        Signal::FilterUsed => Some((xp.gallery_filter, "Gallery Filter")),
        Signal::LightboxOpen
        | Signal::MobileVisit
        | Signal::PerfectForm
        | Signal::AudioEnabled
        | Signal::AnimationInteraction
        | Signal::KeyboardShortcut
        | Signal::AccessibilityFeature => None,
    }
}

impl Engine {
    /// Build an engine over `backend`, loading any saved progress.
    ///
    /// No session is started; call [`Engine::start_session`] once the page
    /// is ready.
    pub fn new(config: EngineConfig, backend: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let store = ProgressStore::new(backend, config.session_history_limit);
        let record = store.load(&config.level_thresholds);
        let visit_count = store.visit_count();
        let now = clock.now();
        let session = SessionStats::new(now.timestamp_millis(), now.hour());
        Self {
            config,
            store,
            record,
            session,
            scheduler: Scheduler::new(),
            clock,
            events: Vec::new(),
            visit_count,
            first_visit: false,
        }
    }

    /// Engine with default configuration and the system clock.
    pub fn with_defaults(backend: Box<dyn KeyValueStore>) -> Self {
        Self::new(EngineConfig::default(), backend, Box::new(SystemClock))
    }

    // =========================================================================
    // XP & Levels
    // =========================================================================

    /// Add XP, recompute the level and persist.
    pub fn add_xp(&mut self, amount: u64, reason: &str) {
        let now = self.clock.now();
        let old_level = self.record.level;
        self.record.xp = self.record.xp.saturating_add(amount);
        self.record.level = level_for_xp(self.record.xp, &self.config.level_thresholds);
        debug!(amount, reason, xp = self.record.xp, level = self.record.level, "xp granted");
        self.events.push(EngineEvent::XpGained {
            amount,
            reason: reason.to_string(),
            total_xp: self.record.xp,
        });

        if self.record.level > old_level {
            self.handle_level_up(old_level, self.record.level);
        }

        self.record
            .track_action(reason, amount, now.timestamp_millis(), &day_key(&now));
        self.save();
    }

    fn handle_level_up(&mut self, old_level: u32, new_level: u32) {
        let bonus_xp = new_level as u64 * self.config.xp.level_up_bonus_per_level;
        info!(old_level, new_level, bonus_xp, "level up");
        self.events.push(EngineEvent::LevelUp {
            old_level,
            new_level,
            bonus_xp,
        });
        self.check_achievements(Trigger::LevelUp);
        self.schedule_grant(bonus_xp, "Level up bonus".to_string());
    }

    fn schedule_grant(&mut self, amount: u64, reason: String) {
        let delay = i64::try_from(self.config.bonus_delay_ms).unwrap_or(i64::MAX);
        let due_at = self.clock.now_ms().saturating_add(delay);
        self.scheduler.schedule(due_at, DeferredGrant { amount, reason });
    }

    // =========================================================================
    // Achievements
    // =========================================================================

    /// Unlock an achievement. Unknown or already-unlocked ids are ignored.
    /// Returns true if newly unlocked.
    pub fn unlock_achievement(&mut self, id: AchievementId) -> bool {
        if !self.unlock(id) {
            return false;
        }
        self.check_achievements(Trigger::AchievementUnlocked);
        true
    }

    /// Unlock by string key, as page components report it.
    pub fn unlock_achievement_key(&mut self, key: &str) -> bool {
        match AchievementId::from_key(key) {
            Some(id) => self.unlock_achievement(id),
            None => {
                debug!(key, "ignoring unknown achievement");
                false
            }
        }
    }

    fn unlock(&mut self, id: AchievementId) -> bool {
        let Some(def) = get_achievement_def(id) else {
            return false;
        };
        if !self.record.unlock(id, self.clock.now_ms()) {
            return false;
        }
        info!(achievement = id.key(), xp_reward = def.xp_reward, "achievement unlocked");
        self.events.push(EngineEvent::AchievementUnlocked {
            id,
            title: def.title,
            icon: def.icon,
            xp_reward: def.xp_reward,
        });
        self.schedule_grant(def.xp_reward, format!("Achievement: {}", def.title));
        self.save();
        true
    }

    /// Evaluate the rules relevant to `trigger` and unlock whatever qualifies.
    ///
    /// Unlocks can make share-based achievements qualify, so evaluation is
    /// repeated for them until nothing new unlocks. Returns the newly
    /// unlocked ids.
    pub fn check_achievements(&mut self, trigger: Trigger) -> Vec<AchievementId> {
        let mut unlocked = Vec::new();
        let mut trigger = trigger;
        loop {
            let qualifying = evaluate(&self.evaluation_context(), trigger);
            let before = unlocked.len();
            for id in qualifying {
                if self.unlock(id) {
                    unlocked.push(id);
                }
            }
            if unlocked.len() == before {
                break;
            }
            trigger = Trigger::AchievementUnlocked;
        }
        unlocked
    }

    fn evaluation_context(&self) -> EvaluationContext<'_> {
        EvaluationContext {
            record: &self.record,
            session: &self.session,
            visit_count: self.visit_count,
            first_visit: self.first_visit,
            page_sections: &self.config.page_sections,
            now_ms: self.clock.now_ms(),
        }
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Begin a session: count the visit, check visit-based achievements and
    /// grant the page-visit XP.
    pub fn start_session(&mut self) {
        let now = self.clock.now();
        self.session = SessionStats::new(now.timestamp_millis(), now.hour());
        self.visit_count = self.store.increment_visit_count();
        self.first_visit = !self.store.has_visited_before();
        if self.first_visit {
            self.store.mark_visited();
        }
        info!(visit_count = self.visit_count, first_visit = self.first_visit, "session started");
        self.events.push(EngineEvent::SessionStarted {
            visit_count: self.visit_count,
        });

        self.check_achievements(Trigger::SessionStart);
        self.add_xp(self.config.xp.page_visit, "Page visit");
    }

    /// Finish the session: long-session bonus and history entry.
    ///
    /// Deferred grants still pending are left alone; call
    /// [`Engine::drain_pending`] first to apply them.
    pub fn end_session(&mut self) -> SessionSummary {
        let now = self.clock.now_ms();
        if self.session.duration_ms(now) > self.config.long_session_ms {
            self.add_xp(self.config.xp.long_session_bonus, "Long session bonus");
        }
        let summary = self.session.summary(now);
        self.store.append_session(summary.clone());
        self.save();
        info!(duration_ms = summary.duration, "session ended");
        self.events.push(EngineEvent::SessionEnded {
            summary: summary.clone(),
        });
        summary
    }

    /// Page visibility changed. Hiding the page saves progress; time only
    /// accrues while visible.
    pub fn set_visible(&mut self, visible: bool) {
        self.session.visible = visible;
        if !visible {
            self.save();
        }
    }

    /// Register the sections the page actually renders.
    pub fn set_page_sections(&mut self, sections: Vec<String>) {
        self.config.page_sections = sections;
    }

    // =========================================================================
    // Page Events
    // =========================================================================

    /// A section scrolled into view. Returns true the first time per session.
    pub fn record_section_view(&mut self, section_id: &str) -> bool {
        if section_id.is_empty() || !self.session.visit_section(section_id) {
            return false;
        }
        self.add_xp(
            self.config.xp.section_view,
            &format!("Visited {} section", section_id),
        );
        let unlocked = self.check_achievements(Trigger::SectionVisited);
        if unlocked.contains(&AchievementId::Explorer) {
            self.add_xp(self.config.xp.explorer_bonus, "Explorer bonus");
        }
        true
    }

    /// In-page navigation link followed.
    pub fn record_navigation(&mut self) {
        self.add_xp(self.config.xp.navigation, "Navigation");
    }

    /// Call-to-action button clicked.
    pub fn record_cta_click(&mut self) {
        self.add_xp(self.config.xp.cta_click, "CTA Click");
    }

    /// Any click on an interactive element.
    pub fn record_interaction(&mut self) {
        self.session.record_interaction();
        self.add_xp(self.config.xp.interaction, "User interaction");
        self.check_achievements(Trigger::Interaction);
    }

    /// A discrete page signal (form submitted, quote shared, ...).
    /// Returns the new lifetime count for the signal.
    pub fn record_signal(&mut self, signal: Signal) -> u64 {
        let count = self.record.increment_signal(signal);
        debug!(signal = signal.key(), count, "signal recorded");
        match signal_reward(&self.config.xp, signal) {
            Some((amount, reason)) => self.add_xp(amount, reason),
            None => {
                self.save();
            }
        }
        self.check_achievements(Trigger::Signal(signal));
        count
    }

    /// Accrue foreground time. Ignored while the page is hidden.
    ///
    /// Time-based achievements are checked on every accrual; milestones
    /// only decide when the milestone XP is granted.
    pub fn record_active_time(&mut self, ms: u64) {
        if !self.session.visible || ms == 0 {
            return;
        }
        let milestones = self
            .session
            .add_active_time(ms, self.config.time_milestone_ms);
        for _ in 0..milestones {
            self.add_xp(self.config.xp.time_milestone, "Time milestone reached");
        }
        self.check_achievements(Trigger::TimeMilestone);
    }

    /// Periodic timer: accrue one tick of time and run due grants.
    pub fn tick(&mut self) {
        self.record_active_time(self.config.tick_interval_ms);
        self.run_due_tasks();
    }

    // =========================================================================
    // Deferred Grants
    // =========================================================================

    /// Apply every deferred grant whose delay has elapsed. Returns how many ran.
    pub fn run_due_tasks(&mut self) -> usize {
        let mut ran = 0;
        while let Some(grant) = self.scheduler.pop_due(self.clock.now_ms()) {
            self.add_xp(grant.amount, &grant.reason);
            ran += 1;
        }
        ran
    }

    /// Apply every pending grant now, including ones scheduled while
    /// draining. Returns how many ran.
    pub fn drain_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Some(grant) = self.scheduler.pop_next() {
            self.add_xp(grant.amount, &grant.reason);
            ran += 1;
        }
        ran
    }

    pub fn pending_grants(&self) -> Vec<DeferredGrant> {
        self.scheduler.pending().cloned().collect()
    }

    // =========================================================================
    // Read Side
    // =========================================================================

    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            xp: self.record.xp,
            level: self.record.level,
            progress_percent: self.progress_to_next_level(),
            xp_to_next_level: xp_to_next_level(
                self.record.xp,
                self.record.level,
                &self.config.level_thresholds,
            ),
            time_spent_minutes: self.session.time_spent_minutes(),
            achievements: self.unlocked_achievements().into_iter().cloned().collect(),
            session: self.session.clone(),
        }
    }

    pub fn progress_to_next_level(&self) -> f64 {
        progress_to_next_level(self.record.xp, self.record.level, &self.config.level_thresholds)
    }

    pub fn xp(&self) -> u64 {
        self.record.xp
    }

    pub fn level(&self) -> u32 {
        self.record.level
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.record.is_unlocked(id)
    }

    pub fn unlocked_achievements(&self) -> Vec<&AchievementState> {
        self.record.unlocked_states()
    }

    pub fn unlocked_count(&self) -> usize {
        self.record.unlocked_count()
    }

    pub fn total_achievements(&self) -> usize {
        ALL_ACHIEVEMENTS.len()
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn session(&self) -> &SessionStats {
        &self.session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn visit_count(&self) -> u64 {
        self.visit_count
    }

    pub fn session_history(&self) -> Vec<SessionSummary> {
        self.store.session_history()
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Wipe all progress. Does nothing unless `confirmed`.
    ///
    /// Clears storage, pending grants and the in-memory record and session,
    /// leaving the engine as if freshly loaded.
    pub fn reset_progress(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.store.reset();
        self.scheduler.clear();
        self.record = ProgressRecord::fresh();
        let now = self.clock.now();
        self.session = SessionStats::new(now.timestamp_millis(), now.hour());
        self.visit_count = 0;
        self.first_visit = false;
        info!("progress reset");
        self.events.push(EngineEvent::ProgressReset);
        true
    }

    pub fn export(&self) -> ExportDump {
        self.store.export()
    }

    pub fn export_to_file(&self, path: &std::path::Path) -> Result<(), crate::utils::StorageError> {
        self.store.export_to_file(path)
    }

    fn save(&mut self) -> bool {
        self.record.last_updated = self.clock.now_ms();
        self.store.save(&self.record)
    }
}
