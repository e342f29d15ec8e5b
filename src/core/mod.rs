//! Core progression: XP, levels, sessions, persistence and the engine.

pub mod clock;
pub mod constants;
pub mod engine;
pub mod events;
pub mod progression;
pub mod record;
pub mod scheduler;
pub mod session;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Engine, ProgressSnapshot};
pub use events::EngineEvent;
pub use record::{ActionRecord, ProgressRecord};
pub use scheduler::DeferredGrant;
pub use session::{SessionStats, SessionSummary};
pub use store::{ExportDump, ProgressStore};
