//! Achievement system types and data structures.

use serde::{Deserialize, Serialize};

/// Achievement categories for organization in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementCategory {
    Introduction,
    Engagement,
    Loyalty,
    Exploration,
    Projects,
    Interaction,
    Content,
    Communication,
    Social,
    Gallery,
    Navigation,
    Progression,
    Special,
    Device,
    Sharing,
    Multimedia,
    Technical,
    Accessibility,
    Ultimate,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 19] = [
        AchievementCategory::Introduction,
        AchievementCategory::Engagement,
        AchievementCategory::Loyalty,
        AchievementCategory::Exploration,
        AchievementCategory::Projects,
        AchievementCategory::Interaction,
        AchievementCategory::Content,
        AchievementCategory::Communication,
        AchievementCategory::Social,
        AchievementCategory::Gallery,
        AchievementCategory::Navigation,
        AchievementCategory::Progression,
        AchievementCategory::Special,
        AchievementCategory::Device,
        AchievementCategory::Sharing,
        AchievementCategory::Multimedia,
        AchievementCategory::Technical,
        AchievementCategory::Accessibility,
        AchievementCategory::Ultimate,
    ];

    /// Display name for the category.
    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Introduction => "Introduction",
            AchievementCategory::Engagement => "Engagement",
            AchievementCategory::Loyalty => "Loyalty",
            AchievementCategory::Exploration => "Exploration",
            AchievementCategory::Projects => "Projects",
            AchievementCategory::Interaction => "Interaction",
            AchievementCategory::Content => "Content",
            AchievementCategory::Communication => "Communication",
            AchievementCategory::Social => "Social",
            AchievementCategory::Gallery => "Gallery",
            AchievementCategory::Navigation => "Navigation",
            AchievementCategory::Progression => "Progression",
            AchievementCategory::Special => "Special",
            AchievementCategory::Device => "Device",
            AchievementCategory::Sharing => "Sharing",
            AchievementCategory::Multimedia => "Multimedia",
            AchievementCategory::Technical => "Technical",
            AchievementCategory::Accessibility => "Accessibility",
            AchievementCategory::Ultimate => "Ultimate",
        }
    }
}

/// How hard an achievement is to come by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Unique identifier for each achievement.
///
/// Serialized as the stable kebab-case key (`first-visit`, `legend-status`, ...)
/// that also appears in persisted progress blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    // Introduction & loyalty
    FirstVisit,
    ReturnVisitor,
    LoyalVisitor,

    // Exploration
    Explorer,
    DeepDiver,
    ProjectHunter,

    // Interaction
    Interactive,
    SuperInteractive,
    QuoteCollector,

    // Engagement (time spent)
    Engaged,
    Dedicated,
    Devoted,

    // Communication
    FirstContact,
    NewsletterSubscriber,
    SocialConnector,

    // Gallery & navigation
    GalleryExplorer,
    FilterMaster,
    LightboxLover,

    // Level milestones
    RisingStar,
    Experienced,
    Expert,
    Master,

    // Special
    NightOwl,
    EarlyBird,
    MobileExplorer,
    SpeedDemon,
    Perfectionist,

    // Sharing
    QuoteSharer,
    BrandAmbassador,

    // Multimedia
    AudioEnthusiast,
    VisualArtist,

    // Technical
    KeyboardNinja,
    AccessibilityChampion,

    // Ultimate
    Completionist,
    LegendStatus,
}

impl AchievementId {
    /// Stable string key used by collaborators and persisted blobs.
    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::FirstVisit => "first-visit",
            AchievementId::ReturnVisitor => "return-visitor",
            AchievementId::LoyalVisitor => "loyal-visitor",
            AchievementId::Explorer => "explorer",
            AchievementId::DeepDiver => "deep-diver",
            AchievementId::ProjectHunter => "project-hunter",
            AchievementId::Interactive => "interactive",
            AchievementId::SuperInteractive => "super-interactive",
            AchievementId::QuoteCollector => "quote-collector",
            AchievementId::Engaged => "engaged",
            AchievementId::Dedicated => "dedicated",
            AchievementId::Devoted => "devoted",
            AchievementId::FirstContact => "first-contact",
            AchievementId::NewsletterSubscriber => "newsletter-subscriber",
            AchievementId::SocialConnector => "social-connector",
            AchievementId::GalleryExplorer => "gallery-explorer",
            AchievementId::FilterMaster => "filter-master",
            AchievementId::LightboxLover => "lightbox-lover",
            AchievementId::RisingStar => "rising-star",
            AchievementId::Experienced => "experienced",
            AchievementId::Expert => "expert",
            AchievementId::Master => "master",
            AchievementId::NightOwl => "night-owl",
            AchievementId::EarlyBird => "early-bird",
            AchievementId::MobileExplorer => "mobile-explorer",
            AchievementId::SpeedDemon => "speed-demon",
            AchievementId::Perfectionist => "perfectionist",
            AchievementId::QuoteSharer => "quote-sharer",
            AchievementId::BrandAmbassador => "brand-ambassador",
            AchievementId::AudioEnthusiast => "audio-enthusiast",
            AchievementId::VisualArtist => "visual-artist",
            AchievementId::KeyboardNinja => "keyboard-ninja",
            AchievementId::AccessibilityChampion => "accessibility-champion",
            AchievementId::Completionist => "completionist",
            AchievementId::LegendStatus => "legend-status",
        }
    }

    /// Look up an id by its string key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<AchievementId> {
        super::data::ALL_ACHIEVEMENTS
            .iter()
            .map(|def| def.id)
            .find(|id| id.key() == key)
    }
}

/// Discrete events reported by page components.
///
/// Each signal has a persisted lifetime counter that count-based
/// requirements are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    ContactForm,
    Newsletter,
    SocialLink,
    QuoteShared,
    PortfolioShared,
    ProjectView,
    QuoteView,
    GalleryItem,
    FilterUsed,
    LightboxOpen,
    MobileVisit,
    PerfectForm,
    AudioEnabled,
    AnimationInteraction,
    KeyboardShortcut,
    AccessibilityFeature,
}

impl Signal {
    pub const ALL: [Signal; 16] = [
        Signal::ContactForm,
        Signal::Newsletter,
        Signal::SocialLink,
        Signal::QuoteShared,
        Signal::PortfolioShared,
        Signal::ProjectView,
        Signal::QuoteView,
        Signal::GalleryItem,
        Signal::FilterUsed,
        Signal::LightboxOpen,
        Signal::MobileVisit,
        Signal::PerfectForm,
        Signal::AudioEnabled,
        Signal::AnimationInteraction,
        Signal::KeyboardShortcut,
        Signal::AccessibilityFeature,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Signal::ContactForm => "contact-form",
            Signal::Newsletter => "newsletter",
            Signal::SocialLink => "social-link",
            Signal::QuoteShared => "quote-shared",
            Signal::PortfolioShared => "portfolio-shared",
            Signal::ProjectView => "project-view",
            Signal::QuoteView => "quote-view",
            Signal::GalleryItem => "gallery-item",
            Signal::FilterUsed => "filter-used",
            Signal::LightboxOpen => "lightbox-open",
            Signal::MobileVisit => "mobile-visit",
            Signal::PerfectForm => "perfect-form",
            Signal::AudioEnabled => "audio-enabled",
            Signal::AnimationInteraction => "animation-interaction",
            Signal::KeyboardShortcut => "keyboard-shortcut",
            Signal::AccessibilityFeature => "accessibility-feature",
        }
    }

    pub fn from_key(key: &str) -> Option<Signal> {
        Signal::ALL.iter().copied().find(|s| s.key() == key)
    }
}

/// Unlock condition of an achievement. One case per requirement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// First session ever recorded on this storage.
    FirstVisit,
    /// Lifetime visit counter reaches `count`.
    Visits { count: u64 },
    /// Every listed section seen this session (or every section the page reports).
    Sections { sections: &'static [&'static str] },
    /// Foreground time this session, in minutes.
    TimeSpent { minutes: u64 },
    /// Interactions this session.
    Interactions { count: u64 },
    /// Level reached.
    Level { level: u32 },
    /// Lifetime count of a discrete signal.
    Signal { signal: Signal, count: u64 },
    /// Local hour-of-day at session start is one of `hours`.
    VisitTime { hours: &'static [u32] },
    /// Sections visited per minute since the session started.
    FastNavigation { sections_per_minute: u64 },
    /// Percentage of the whole catalog unlocked.
    AchievementShare { percentage: u64 },
    /// All thresholds at once.
    Ultimate {
        level: u32,
        achievements_unlocked: usize,
        time_spent_minutes: u64,
        interactions: u64,
    },
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub rarity: Rarity,
    pub xp_reward: u64,
    pub requirement: Requirement,
}

/// Unlock state of one achievement (persisted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementState {
    pub id: AchievementId,
    pub unlocked: bool,
    pub unlocked_at: Option<i64>,
}

impl AchievementState {
    pub fn locked(id: AchievementId) -> Self {
        Self {
            id,
            unlocked: false,
            unlocked_at: None,
        }
    }

    /// Mark unlocked at `timestamp`. Returns true if newly unlocked.
    pub fn unlock(&mut self, timestamp: i64) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        self.unlocked_at = Some(timestamp);
        true
    }
}
