//! Rule evaluation: which achievements newly qualify.
//!
//! Evaluation is pure. It reads the progress record and session and returns
//! ids; unlocking is left to the engine.

use crate::core::record::ProgressRecord;
use crate::core::session::SessionStats;

use super::data::ALL_ACHIEVEMENTS;
use super::types::{AchievementDef, AchievementId, Requirement, Signal};

/// What just happened. Limits evaluation to the requirement kinds that
/// could have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    SessionStart,
    SectionVisited,
    Interaction,
    TimeMilestone,
    LevelUp,
    Signal(Signal),
    AchievementUnlocked,
    /// Every requirement kind.
    All,
}

/// Read-only view of the state a requirement may depend on.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub record: &'a ProgressRecord,
    pub session: &'a SessionStats,
    /// Lifetime visits, including the current one.
    pub visit_count: u64,
    /// True when the current session is the first ever.
    pub first_visit: bool,
    /// Sections the page currently reports. Empty when the host never
    /// registered any.
    pub page_sections: &'a [String],
    pub now_ms: i64,
}

impl Requirement {
    /// Whether a change described by `trigger` can affect this requirement.
    pub fn is_relevant_to(&self, trigger: Trigger) -> bool {
        if trigger == Trigger::All {
            return true;
        }
        match self {
            Requirement::FirstVisit | Requirement::Visits { .. } | Requirement::VisitTime { .. } => {
                trigger == Trigger::SessionStart
            }
            Requirement::Sections { .. } | Requirement::FastNavigation { .. } => {
                trigger == Trigger::SectionVisited
            }
            Requirement::TimeSpent { .. } => trigger == Trigger::TimeMilestone,
            Requirement::Interactions { .. } => trigger == Trigger::Interaction,
            Requirement::Level { .. } => trigger == Trigger::LevelUp,
            Requirement::Signal { signal, .. } => trigger == Trigger::Signal(*signal),
            Requirement::AchievementShare { .. } => trigger == Trigger::AchievementUnlocked,
            Requirement::Ultimate { .. } => matches!(
                trigger,
                Trigger::AchievementUnlocked
                    | Trigger::LevelUp
                    | Trigger::TimeMilestone
                    | Trigger::Interaction
            ),
        }
    }

    /// Whether the requirement is met by the given state.
    pub fn is_satisfied(&self, ctx: &EvaluationContext<'_>) -> bool {
        match *self {
            Requirement::FirstVisit => ctx.first_visit,
            Requirement::Visits { count } => ctx.visit_count >= count,
            Requirement::Sections { sections } => {
                let visited = &ctx.session.sections_visited;
                let declared = sections.iter().all(|s| visited.contains(*s));
                let on_page = !ctx.page_sections.is_empty()
                    && ctx
                        .page_sections
                        .iter()
                        .filter(|s| visited.contains(s.as_str()))
                        .count()
                        >= ctx.page_sections.len();
                declared || on_page
            }
            Requirement::TimeSpent { minutes } => {
                ctx.session.time_spent_ms >= minutes.saturating_mul(60_000)
            }
            Requirement::Interactions { count } => ctx.session.interactions_count >= count,
            Requirement::Level { level } => ctx.record.level >= level,
            Requirement::Signal { signal, count } => ctx.record.signal_count(signal) >= count,
            Requirement::VisitTime { hours } => hours.contains(&ctx.session.start_hour),
            Requirement::FastNavigation {
                sections_per_minute,
            } => {
                let visited = ctx.session.sections_visited.len() as u64;
                let elapsed_ms = ctx.session.duration_ms(ctx.now_ms).max(1);
                visited >= sections_per_minute
                    && visited * 60_000 >= sections_per_minute * elapsed_ms
            }
            Requirement::AchievementShare { percentage } => {
                let unlocked = ctx.record.unlocked_count() as u64;
                unlocked * 100 >= percentage * ALL_ACHIEVEMENTS.len() as u64
            }
            Requirement::Ultimate {
                level,
                achievements_unlocked,
                time_spent_minutes,
                interactions,
            } => {
                ctx.record.level >= level
                    && ctx.record.unlocked_count() >= achievements_unlocked
                    && ctx.session.time_spent_ms >= time_spent_minutes.saturating_mul(60_000)
                    && ctx.session.interactions_count >= interactions
            }
        }
    }
}

/// Achievements relevant to `trigger` that are still locked and now qualify,
/// in catalog order. Every qualifying id is returned.
pub fn evaluate(ctx: &EvaluationContext<'_>, trigger: Trigger) -> Vec<AchievementId> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|def| qualifies(def, ctx, trigger))
        .map(|def| def.id)
        .collect()
}

fn qualifies(def: &AchievementDef, ctx: &EvaluationContext<'_>, trigger: Trigger) -> bool {
    !ctx.record.is_unlocked(def.id)
        && def.requirement.is_relevant_to(trigger)
        && def.requirement.is_satisfied(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::data::EXPLORER_SECTIONS;

    fn context<'a>(record: &'a ProgressRecord, session: &'a SessionStats) -> EvaluationContext<'a> {
        EvaluationContext {
            record,
            session,
            visit_count: 1,
            first_visit: false,
            page_sections: &[],
            now_ms: session.start_time,
        }
    }

    #[test]
    fn test_time_spent_thresholds() {
        let record = ProgressRecord::fresh();
        let mut session = SessionStats::new(0, 12);
        session.time_spent_ms = 5 * 60 * 1000;

        let ids = evaluate(&context(&record, &session), Trigger::TimeMilestone);
        assert_eq!(ids, vec![AchievementId::Engaged]);

        session.time_spent_ms = 30 * 60 * 1000;
        let ids = evaluate(&context(&record, &session), Trigger::TimeMilestone);
        assert_eq!(
            ids,
            vec![
                AchievementId::DeepDiver,
                AchievementId::Engaged,
                AchievementId::Dedicated,
                AchievementId::Devoted
            ]
        );
    }

    #[test]
    fn test_unlocked_achievements_are_skipped() {
        let mut record = ProgressRecord::fresh();
        record.unlock(AchievementId::Interactive, 1);
        let mut session = SessionStats::new(0, 12);
        session.interactions_count = 10;

        let ids = evaluate(&context(&record, &session), Trigger::Interaction);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_trigger_restricts_kinds() {
        let record = ProgressRecord::fresh();
        let mut session = SessionStats::new(0, 12);
        session.interactions_count = 50;

        assert!(evaluate(&context(&record, &session), Trigger::SectionVisited).is_empty());
        assert_eq!(
            evaluate(&context(&record, &session), Trigger::All),
            vec![AchievementId::Interactive, AchievementId::SuperInteractive]
        );
    }

    #[test]
    fn test_sections_declared_list() {
        let record = ProgressRecord::fresh();
        let mut session = SessionStats::new(0, 12);
        for section in &EXPLORER_SECTIONS[..5] {
            session.visit_section(section);
        }
        let mut ctx = context(&record, &session);
        ctx.now_ms = 10 * 60_000;
        assert!(!evaluate(&ctx, Trigger::SectionVisited).contains(&AchievementId::Explorer));

        session.visit_section(EXPLORER_SECTIONS[5]);
        let mut ctx = context(&record, &session);
        ctx.now_ms = 10 * 60_000;
        assert!(evaluate(&ctx, Trigger::SectionVisited).contains(&AchievementId::Explorer));
    }

    #[test]
    fn test_sections_page_count() {
        let record = ProgressRecord::fresh();
        let mut session = SessionStats::new(0, 12);
        session.visit_section("intro");
        session.visit_section("work");
        let page = vec!["intro".to_string(), "work".to_string()];
        let ctx = EvaluationContext {
            page_sections: &page,
            now_ms: 10 * 60_000,
            ..context(&record, &session)
        };
        assert_eq!(evaluate(&ctx, Trigger::SectionVisited), vec![AchievementId::Explorer]);
    }

    #[test]
    fn test_sections_page_count_ignores_other_ids() {
        let record = ProgressRecord::fresh();
        let mut session = SessionStats::new(0, 12);
        for section in ["intro", "x1", "x2"] {
            session.visit_section(section);
        }
        let page = vec!["intro".to_string(), "work".to_string()];
        let ctx = EvaluationContext {
            page_sections: &page,
            now_ms: 10 * 60_000,
            ..context(&record, &session)
        };
        assert!(evaluate(&ctx, Trigger::SectionVisited).is_empty());
    }

    #[test]
    fn test_fast_navigation() {
        let record = ProgressRecord::fresh();
        let mut session = SessionStats::new(0, 12);
        for section in ["home", "about", "journey"] {
            session.visit_section(section);
        }
        let mut ctx = context(&record, &session);
        ctx.now_ms = 30_000;
        assert!(evaluate(&ctx, Trigger::SectionVisited).contains(&AchievementId::SpeedDemon));

        ctx.now_ms = 5 * 60_000;
        assert!(!evaluate(&ctx, Trigger::SectionVisited).contains(&AchievementId::SpeedDemon));
    }

    #[test]
    fn test_visit_time_hours() {
        let record = ProgressRecord::fresh();
        let session = SessionStats::new(0, 5);
        let ids = evaluate(&context(&record, &session), Trigger::SessionStart);
        assert_eq!(ids, vec![AchievementId::NightOwl, AchievementId::EarlyBird]);

        let session = SessionStats::new(0, 14);
        assert!(evaluate(&context(&record, &session), Trigger::SessionStart).is_empty());
    }

    #[test]
    fn test_visits_and_first_visit() {
        let record = ProgressRecord::fresh();
        let session = SessionStats::new(0, 12);
        let ctx = EvaluationContext {
            visit_count: 10,
            first_visit: true,
            ..context(&record, &session)
        };
        assert_eq!(
            evaluate(&ctx, Trigger::SessionStart),
            vec![
                AchievementId::FirstVisit,
                AchievementId::ReturnVisitor,
                AchievementId::LoyalVisitor
            ]
        );
    }

    #[test]
    fn test_signal_counts() {
        let mut record = ProgressRecord::fresh();
        let session = SessionStats::new(0, 12);
        record.increment_signal(Signal::FilterUsed);
        record.increment_signal(Signal::FilterUsed);
        let trigger = Trigger::Signal(Signal::FilterUsed);
        assert!(evaluate(&context(&record, &session), trigger).is_empty());

        record.increment_signal(Signal::FilterUsed);
        assert_eq!(
            evaluate(&context(&record, &session), trigger),
            vec![AchievementId::FilterMaster]
        );
        assert!(evaluate(&context(&record, &session), Trigger::Signal(Signal::Newsletter)).is_empty());
    }

    #[test]
    fn test_level_requirement_uses_at_least() {
        let mut record = ProgressRecord::fresh();
        record.level = 11;
        let session = SessionStats::new(0, 12);
        assert_eq!(
            evaluate(&context(&record, &session), Trigger::LevelUp),
            vec![AchievementId::RisingStar, AchievementId::Experienced]
        );
    }

    #[test]
    fn test_completionist_share() {
        let mut record = ProgressRecord::fresh();
        let session = SessionStats::new(0, 12);
        // 80% of 35 is 28
        for def in ALL_ACHIEVEMENTS.iter().take(27) {
            record.unlock(def.id, 1);
        }
        assert!(evaluate(&context(&record, &session), Trigger::AchievementUnlocked).is_empty());

        record.unlock(ALL_ACHIEVEMENTS[27].id, 1);
        assert_eq!(
            evaluate(&context(&record, &session), Trigger::AchievementUnlocked),
            vec![AchievementId::Completionist]
        );
    }

    #[test]
    fn test_ultimate_needs_every_threshold() {
        let mut record = ProgressRecord::fresh();
        for def in ALL_ACHIEVEMENTS.iter().take(30) {
            record.unlock(def.id, 1);
        }
        record.level = 25;
        let mut session = SessionStats::new(0, 12);
        session.time_spent_ms = 60 * 60_000;
        session.interactions_count = 99;
        let ctx = context(&record, &session);
        assert!(!evaluate(&ctx, Trigger::Interaction).contains(&AchievementId::LegendStatus));

        session.interactions_count = 100;
        let ctx = context(&record, &session);
        assert!(evaluate(&ctx, Trigger::Interaction).contains(&AchievementId::LegendStatus));
    }
}
