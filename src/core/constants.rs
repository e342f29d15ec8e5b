// Level thresholds: level N starts at LEVEL_THRESHOLDS[N - 1] total XP
pub const LEVEL_THRESHOLDS: [u64; 11] = [0, 100, 250, 500, 1000, 1750, 2750, 4000, 5500, 7500, 10000];
pub const LEVEL_UP_BONUS_PER_LEVEL: u64 = 10;

// XP awards
pub const XP_PAGE_VISIT: u64 = 5;
pub const XP_NAVIGATION: u64 = 5;
pub const XP_SECTION_VIEW: u64 = 10;
pub const XP_PROJECT_VIEW: u64 = 15;
pub const XP_GALLERY_VIEW: u64 = 10;
pub const XP_QUOTE_VIEW: u64 = 2;
pub const XP_QUOTE_SHARE: u64 = 10;
pub const XP_CTA_CLICK: u64 = 10;
pub const XP_CONTACT_FORM: u64 = 50;
pub const XP_NEWSLETTER_SIGNUP: u64 = 20;
pub const XP_SOCIAL_SHARE: u64 = 15;
pub const XP_GALLERY_FILTER: u64 = 5;
pub const XP_INTERACTION: u64 = 2;
pub const XP_TIME_MILESTONE: u64 = 25;
pub const XP_EXPLORER_BONUS: u64 = 100;
pub const XP_LONG_SESSION_BONUS: u64 = 50;

// Timing (milliseconds)
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const BONUS_DELAY_MS: u64 = 1000;
pub const TIME_MILESTONE_MS: u64 = 5 * 60 * 1000;
pub const LONG_SESSION_MS: u64 = 10 * 60 * 1000;

// Persistence
pub const SESSION_HISTORY_LIMIT: usize = 20;
pub const PROGRESS_KEY: &str = "gamificationData";
pub const SESSION_HISTORY_KEY: &str = "sessionHistory";
pub const VISIT_COUNT_KEY: &str = "visitCount";
pub const FIRST_VISIT_KEY: &str = "hasVisitedBefore";
pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_EXPORT_FILE: &str = "portfolio-progress.json";
