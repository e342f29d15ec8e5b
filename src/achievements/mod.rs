//! Achievement system module.
//!
//! The catalog is static data; unlock state lives in the progress record
//! owned by the engine. Rule evaluation is pure and never mutates anything.

pub mod data;
pub mod evaluator;
pub mod types;

pub use data::{get_achievement_def, get_achievements_by_category, ALL_ACHIEVEMENTS};
pub use evaluator::{evaluate, EvaluationContext, Trigger};
pub use types::{
    AchievementCategory, AchievementDef, AchievementId, AchievementState, Rarity, Requirement,
    Signal,
};
