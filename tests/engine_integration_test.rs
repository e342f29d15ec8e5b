//! Integration test: progression engine
//!
//! Drives the engine through the public API the way a page would: sessions,
//! section views, interactions, timer ticks and signals. Checks XP and level
//! bookkeeping, achievement idempotence, deferred rewards, session history
//! and reloading state from the same storage.

use chrono::FixedOffset;
use legend::achievements::data::EXPLORER_SECTIONS;
use legend::core::constants::{LEVEL_THRESHOLDS, PROGRESS_KEY};
use legend::core::progression::level_for_xp;
use legend::{AchievementId, Engine, EngineConfig, EngineEvent, ManualClock, MemoryStore, Signal};

const NOON: i64 = 12 * 3_600_000;

fn engine_on(backend: &MemoryStore, clock: &ManualClock) -> Engine {
    Engine::new(
        EngineConfig::default(),
        Box::new(backend.clone()),
        Box::new(clock.clone()),
    )
}

fn fresh() -> (Engine, MemoryStore, ManualClock) {
    let backend = MemoryStore::new();
    let clock = ManualClock::new(NOON);
    let engine = engine_on(&backend, &clock);
    (engine, backend, clock)
}

fn unlock_events(events: &[EngineEvent], id: AchievementId) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, EngineEvent::AchievementUnlocked { id: got, .. } if *got == id))
        .count()
}

fn action_total(engine: &Engine, action: &str) -> (u64, u64) {
    engine
        .record()
        .actions
        .values()
        .filter(|a| a.action == action)
        .fold((0, 0), |(count, xp), a| (count + a.count, xp + a.total_xp))
}

// =============================================================================
// XP & Levels
// =============================================================================

#[test]
fn test_level_tracks_xp_and_never_decreases() {
    let (mut engine, _, _) = fresh();
    let mut last_level = engine.level();
    for amount in [3, 40, 57, 150, 1, 600, 999, 4_000] {
        engine.add_xp(amount, "Interaction");
        assert_eq!(engine.level(), level_for_xp(engine.xp(), &LEVEL_THRESHOLDS));
        assert!(engine.level() >= last_level);
        last_level = engine.level();
    }
}

#[test]
fn test_reaching_level_two_grants_bonus_after_delay() {
    let (mut engine, _, clock) = fresh();
    engine.add_xp(100, "Contact Form");
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.xp(), 100);

    clock.advance(1_000);
    engine.run_due_tasks();
    assert_eq!(engine.xp(), 120);
    assert_eq!(action_total(&engine, "Level up bonus"), (1, 20));
}

#[test]
fn test_progress_percent_stays_in_range() {
    let (mut engine, _, _) = fresh();
    assert_eq!(engine.progress().progress_percent, 0.0);
    engine.add_xp(175, "Interaction");
    // level 2 spans 100..250
    assert!((engine.progress().progress_percent - 50.0).abs() < 1e-9);

    engine.add_xp(50_000, "Interaction");
    assert_eq!(engine.level(), LEVEL_THRESHOLDS.len() as u32);
    assert_eq!(engine.progress().progress_percent, 100.0);
}

// =============================================================================
// Achievements
// =============================================================================

#[test]
fn test_unlock_is_idempotent() {
    let (mut engine, _, clock) = fresh();
    assert!(engine.unlock_achievement(AchievementId::NewsletterSubscriber));
    clock.advance(60_000);
    assert!(!engine.unlock_achievement(AchievementId::NewsletterSubscriber));
    assert!(!engine.unlock_achievement_key("newsletter-subscriber"));

    engine.drain_pending();
    assert_eq!(engine.xp(), 50);
    assert_eq!(engine.unlocked_count(), 1);
    let state = engine.unlocked_achievements()[0].clone();
    assert_eq!(state.unlocked_at, Some(NOON));
}

#[test]
fn test_engaged_unlocks_once_after_five_minutes() {
    let (mut engine, _, clock) = fresh();
    engine.start_session();

    let mut events = engine.take_events();
    for _ in 0..(6 * 60) {
        clock.advance(1_000);
        engine.tick();
        events.extend(engine.take_events());
    }

    assert!(engine.is_unlocked(AchievementId::Engaged));
    assert_eq!(unlock_events(&events, AchievementId::Engaged), 1);
    assert_eq!(action_total(&engine, "Achievement: Engaged Visitor"), (1, 45));
    assert_eq!(action_total(&engine, "Time milestone reached"), (1, 25));
}

#[test]
fn test_hidden_time_does_not_count() {
    let (mut engine, _, _) = fresh();
    engine.start_session();
    engine.set_visible(false);
    for _ in 0..(6 * 60) {
        engine.tick();
    }
    assert!(!engine.is_unlocked(AchievementId::Engaged));
    assert_eq!(engine.session().time_spent_ms, 0);
}

#[test]
fn test_explorer_unlocks_once_with_bonus() {
    let (mut engine, _, _) = fresh();
    let mut events = Vec::new();
    for section in EXPLORER_SECTIONS {
        assert!(engine.record_section_view(section));
        events.extend(engine.take_events());
    }
    for section in EXPLORER_SECTIONS {
        assert!(!engine.record_section_view(section));
    }
    events.extend(engine.take_events());

    assert!(engine.is_unlocked(AchievementId::Explorer));
    assert_eq!(unlock_events(&events, AchievementId::Explorer), 1);
    assert_eq!(action_total(&engine, "Explorer bonus"), (1, 100));

    engine.drain_pending();
    assert_eq!(action_total(&engine, "Achievement: Portfolio Explorer"), (1, 75));
}

#[test]
fn test_explorer_counts_registered_page_sections() {
    let (mut engine, _, _) = fresh();
    engine.set_page_sections(vec!["intro".to_string(), "work".to_string()]);
    engine.record_section_view("intro");
    assert!(!engine.is_unlocked(AchievementId::Explorer));
    engine.record_section_view("work");
    assert!(engine.is_unlocked(AchievementId::Explorer));
}

#[test]
fn test_explorer_ignores_unknown_section_ids() {
    let (mut engine, _, _) = fresh();
    for i in 1..=EXPLORER_SECTIONS.len() {
        engine.record_section_view(&format!("x{}", i));
    }
    assert!(!engine.is_unlocked(AchievementId::Explorer));

    engine.set_page_sections(vec!["intro".to_string(), "work".to_string()]);
    engine.record_section_view("intro");
    engine.record_section_view("x9");
    assert!(!engine.is_unlocked(AchievementId::Explorer));
}

#[test]
fn test_interactions_unlock_interactive() {
    let (mut engine, _, _) = fresh();
    for _ in 0..9 {
        engine.record_interaction();
    }
    assert!(!engine.is_unlocked(AchievementId::Interactive));
    engine.record_interaction();
    assert!(engine.is_unlocked(AchievementId::Interactive));
    assert_eq!(action_total(&engine, "User interaction"), (10, 20));
}

#[test]
fn test_signal_thresholds() {
    let (mut engine, _, _) = fresh();
    for _ in 0..4 {
        engine.record_signal(Signal::ProjectView);
    }
    assert!(!engine.is_unlocked(AchievementId::ProjectHunter));
    assert_eq!(engine.record_signal(Signal::ProjectView), 5);
    assert!(engine.is_unlocked(AchievementId::ProjectHunter));
}

#[test]
fn test_night_visit_uses_local_hour() {
    let backend = MemoryStore::new();
    // 12:00 UTC is 23:00 at UTC+11
    let offset = FixedOffset::east_opt(11 * 3600).unwrap();
    let clock = ManualClock::with_offset(NOON, offset);
    let mut engine = engine_on(&backend, &clock);
    engine.start_session();

    assert!(engine.is_unlocked(AchievementId::NightOwl));
    assert!(!engine.is_unlocked(AchievementId::EarlyBird));
}

#[test]
fn test_midday_visit_unlocks_no_time_of_day_achievement() {
    let (mut engine, _, _) = fresh();
    engine.start_session();
    assert!(!engine.is_unlocked(AchievementId::NightOwl));
    assert!(!engine.is_unlocked(AchievementId::EarlyBird));
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_visits_across_reloads() {
    let backend = MemoryStore::new();
    let clock = ManualClock::new(NOON);

    for visit in 1..=3u64 {
        let mut engine = engine_on(&backend, &clock);
        engine.start_session();
        assert_eq!(engine.visit_count(), visit);
        assert_eq!(engine.is_unlocked(AchievementId::ReturnVisitor), visit >= 3);
        engine.drain_pending();
        engine.end_session();
        clock.advance(3_600_000);
    }

    let engine = engine_on(&backend, &clock);
    assert!(engine.is_unlocked(AchievementId::FirstVisit));
    assert_eq!(engine.session_history().len(), 3);
}

#[test]
fn test_long_session_bonus() {
    let (mut engine, _, clock) = fresh();
    engine.start_session();
    clock.advance(9 * 60_000);
    engine.end_session();
    assert_eq!(action_total(&engine, "Long session bonus"), (0, 0));

    engine.start_session();
    clock.advance(11 * 60_000);
    let summary = engine.end_session();
    assert_eq!(summary.duration, 11 * 60_000);
    assert_eq!(action_total(&engine, "Long session bonus"), (1, 50));
}

#[test]
fn test_session_history_is_capped() {
    let (mut engine, _, clock) = fresh();
    for _ in 0..25 {
        engine.start_session();
        clock.advance(1_000);
        engine.end_session();
    }
    let history = engine.session_history();
    assert_eq!(history.len(), 20);
    assert_eq!(history.last().unwrap().timestamp, NOON + 25_000);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_state_survives_reload() {
    let (mut engine, backend, clock) = fresh();
    engine.start_session();
    engine.record_signal(Signal::QuoteView);
    engine.record_signal(Signal::QuoteView);
    engine.unlock_achievement(AchievementId::AudioEnthusiast);
    engine.drain_pending();

    let reloaded = engine_on(&backend, &clock);
    assert_eq!(reloaded.xp(), engine.xp());
    assert_eq!(reloaded.level(), engine.level());
    assert_eq!(reloaded.record().achievements, engine.record().achievements);
    assert_eq!(reloaded.record().signal_count(Signal::QuoteView), 2);
    assert_eq!(reloaded.record().actions, engine.record().actions);
}

#[test]
fn test_corrupt_progress_loads_defaults() {
    let backend = MemoryStore::new();
    backend.insert_raw(PROGRESS_KEY, "{\"xp\": \"lots\"");
    let engine = engine_on(&backend, &ManualClock::new(NOON));

    assert_eq!(engine.xp(), 0);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.unlocked_count(), 0);
}

#[test]
fn test_storage_failure_is_not_fatal() {
    let (mut engine, backend, clock) = fresh();
    backend.set_failing(true);
    engine.start_session();
    engine.add_xp(100, "Contact Form");
    assert_eq!(engine.level(), 2);

    backend.set_failing(false);
    let reloaded = engine_on(&backend, &clock);
    assert_eq!(reloaded.xp(), 0);
}

#[test]
fn test_reset_clears_progress_but_not_first_visit_flag() {
    let (mut engine, backend, clock) = fresh();
    engine.start_session();
    engine.drain_pending();
    assert!(engine.reset_progress(true));

    let mut engine = engine_on(&backend, &clock);
    assert_eq!(engine.xp(), 0);
    assert_eq!(engine.visit_count(), 0);
    assert!(engine.session_history().is_empty());

    engine.start_session();
    assert_eq!(engine.visit_count(), 1);
    assert!(!engine.is_unlocked(AchievementId::FirstVisit));
}

#[test]
fn test_export_includes_everything() {
    let (mut engine, _, clock) = fresh();
    engine.start_session();
    clock.advance(2_000);
    engine.end_session();

    let dump = engine.export();
    assert_eq!(dump.visit_count, "1");
    assert_eq!(dump.sessions.len(), 1);
    assert_eq!(dump.gamification["xp"], serde_json::json!(engine.xp()));

    let json = serde_json::to_value(&dump).unwrap();
    assert!(json.get("visitCount").is_some());
}
