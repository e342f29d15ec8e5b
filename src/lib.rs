//! Legend - visitor progression engine library.
//!
//! Tracks experience points, levels and achievements for a portfolio site
//! and persists them as key/value JSON blobs.

pub mod achievements;
pub mod build_info;
pub mod config;
pub mod core;
pub mod utils;

pub use achievements::{AchievementId, Signal, Trigger};
pub use config::EngineConfig;
pub use crate::core::{Engine, EngineEvent, ManualClock, SystemClock};
pub use utils::{FileStore, MemoryStore};
