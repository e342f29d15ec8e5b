//! Static achievement definitions.

use std::collections::BTreeMap;

use super::types::{AchievementCategory, AchievementDef, AchievementId, Rarity, Requirement, Signal};

/// Sections a visitor must see for the explorer achievement.
pub const EXPLORER_SECTIONS: &[&str] = &["home", "about", "journey", "projects", "gallery", "contact"];

const NIGHT_HOURS: &[u32] = &[22, 23, 0, 1, 2, 3, 4, 5];
const MORNING_HOURS: &[u32] = &[5, 6, 7, 8];

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // INTRODUCTION & LOYALTY
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstVisit,
        title: "Welcome to The Legend",
        description: "Visited the portfolio for the first time",
        icon: "🎉",
        category: AchievementCategory::Introduction,
        rarity: Rarity::Common,
        xp_reward: 25,
        requirement: Requirement::FirstVisit,
    },
    AchievementDef {
        id: AchievementId::ReturnVisitor,
        title: "Coming Back for More",
        description: "Returned to the portfolio multiple times",
        icon: "🔄",
        category: AchievementCategory::Engagement,
        rarity: Rarity::Common,
        xp_reward: 50,
        requirement: Requirement::Visits { count: 3 },
    },
    AchievementDef {
        id: AchievementId::LoyalVisitor,
        title: "Loyal Explorer",
        description: "Visited the portfolio 10+ times",
        icon: "💎",
        category: AchievementCategory::Loyalty,
        rarity: Rarity::Rare,
        xp_reward: 100,
        requirement: Requirement::Visits { count: 10 },
    },
    // ═══════════════════════════════════════════════════════════════
    // EXPLORATION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Explorer,
        title: "Portfolio Explorer",
        description: "Visited all sections of the portfolio",
        icon: "🗺️",
        category: AchievementCategory::Exploration,
        rarity: Rarity::Uncommon,
        xp_reward: 75,
        requirement: Requirement::Sections {
            sections: EXPLORER_SECTIONS,
        },
    },
    AchievementDef {
        id: AchievementId::DeepDiver,
        title: "Deep Diver",
        description: "Spent significant time exploring the content",
        icon: "🏊",
        category: AchievementCategory::Engagement,
        rarity: Rarity::Uncommon,
        xp_reward: 60,
        requirement: Requirement::TimeSpent { minutes: 10 },
    },
    AchievementDef {
        id: AchievementId::ProjectHunter,
        title: "Project Hunter",
        description: "Viewed multiple projects in detail",
        icon: "🔍",
        category: AchievementCategory::Projects,
        rarity: Rarity::Common,
        xp_reward: 40,
        requirement: Requirement::Signal {
            signal: Signal::ProjectView,
            count: 5,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // INTERACTION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Interactive,
        title: "Interactive User",
        description: "Made 10+ interactions with the portfolio",
        icon: "🖱️",
        category: AchievementCategory::Interaction,
        rarity: Rarity::Common,
        xp_reward: 35,
        requirement: Requirement::Interactions { count: 10 },
    },
    AchievementDef {
        id: AchievementId::SuperInteractive,
        title: "Super Interactive",
        description: "Made 50+ interactions",
        icon: "⚡",
        category: AchievementCategory::Interaction,
        rarity: Rarity::Rare,
        xp_reward: 80,
        requirement: Requirement::Interactions { count: 50 },
    },
    AchievementDef {
        id: AchievementId::QuoteCollector,
        title: "Quote Collector",
        description: "Viewed 10 different motivational quotes",
        icon: "💬",
        category: AchievementCategory::Content,
        rarity: Rarity::Common,
        xp_reward: 30,
        requirement: Requirement::Signal {
            signal: Signal::QuoteView,
            count: 10,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // ENGAGEMENT
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Engaged,
        title: "Engaged Visitor",
        description: "Spent 5+ minutes exploring the portfolio",
        icon: "⏰",
        category: AchievementCategory::Engagement,
        rarity: Rarity::Common,
        xp_reward: 45,
        requirement: Requirement::TimeSpent { minutes: 5 },
    },
    AchievementDef {
        id: AchievementId::Dedicated,
        title: "Dedicated Explorer",
        description: "Spent 15+ minutes diving deep into content",
        icon: "🎯",
        category: AchievementCategory::Engagement,
        rarity: Rarity::Uncommon,
        xp_reward: 75,
        requirement: Requirement::TimeSpent { minutes: 15 },
    },
    AchievementDef {
        id: AchievementId::Devoted,
        title: "Devoted Fan",
        description: "Spent 30+ minutes thoroughly exploring everything",
        icon: "❤️",
        category: AchievementCategory::Engagement,
        rarity: Rarity::Rare,
        xp_reward: 120,
        requirement: Requirement::TimeSpent { minutes: 30 },
    },
    // ═══════════════════════════════════════════════════════════════
    // COMMUNICATION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstContact,
        title: "First Contact",
        description: "Sent your first message through the contact form",
        icon: "📧",
        category: AchievementCategory::Communication,
        rarity: Rarity::Uncommon,
        xp_reward: 100,
        requirement: Requirement::Signal {
            signal: Signal::ContactForm,
            count: 1,
        },
    },
    AchievementDef {
        id: AchievementId::NewsletterSubscriber,
        title: "Newsletter Subscriber",
        description: "Subscribed to the newsletter for updates",
        icon: "📰",
        category: AchievementCategory::Communication,
        rarity: Rarity::Common,
        xp_reward: 50,
        requirement: Requirement::Signal {
            signal: Signal::Newsletter,
            count: 1,
        },
    },
    AchievementDef {
        id: AchievementId::SocialConnector,
        title: "Social Connector",
        description: "Connected on social media platforms",
        icon: "🔗",
        category: AchievementCategory::Social,
        rarity: Rarity::Common,
        xp_reward: 40,
        requirement: Requirement::Signal {
            signal: Signal::SocialLink,
            count: 1,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // GALLERY & NAVIGATION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::GalleryExplorer,
        title: "Gallery Explorer",
        description: "Explored the project gallery extensively",
        icon: "🖼️",
        category: AchievementCategory::Gallery,
        rarity: Rarity::Common,
        xp_reward: 35,
        requirement: Requirement::Signal {
            signal: Signal::GalleryItem,
            count: 5,
        },
    },
    AchievementDef {
        id: AchievementId::FilterMaster,
        title: "Filter Master",
        description: "Used multiple filters to browse projects",
        icon: "🔧",
        category: AchievementCategory::Navigation,
        rarity: Rarity::Common,
        xp_reward: 25,
        requirement: Requirement::Signal {
            signal: Signal::FilterUsed,
            count: 3,
        },
    },
    AchievementDef {
        id: AchievementId::LightboxLover,
        title: "Lightbox Lover",
        description: "Viewed projects in detailed lightbox mode",
        icon: "💡",
        category: AchievementCategory::Gallery,
        rarity: Rarity::Common,
        xp_reward: 30,
        requirement: Requirement::Signal {
            signal: Signal::LightboxOpen,
            count: 3,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // LEVEL MILESTONES
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::RisingStar,
        title: "Rising Star",
        description: "Reached Level 5",
        icon: "⭐",
        category: AchievementCategory::Progression,
        rarity: Rarity::Uncommon,
        xp_reward: 75,
        requirement: Requirement::Level { level: 5 },
    },
    AchievementDef {
        id: AchievementId::Experienced,
        title: "Experienced Explorer",
        description: "Reached Level 10",
        icon: "🌟",
        category: AchievementCategory::Progression,
        rarity: Rarity::Rare,
        xp_reward: 150,
        requirement: Requirement::Level { level: 10 },
    },
    AchievementDef {
        id: AchievementId::Expert,
        title: "Portfolio Expert",
        description: "Reached Level 15",
        icon: "🏆",
        category: AchievementCategory::Progression,
        rarity: Rarity::Epic,
        xp_reward: 250,
        requirement: Requirement::Level { level: 15 },
    },
    AchievementDef {
        id: AchievementId::Master,
        title: "Master of The Legend",
        description: "Reached Level 20",
        icon: "👑",
        category: AchievementCategory::Progression,
        rarity: Rarity::Legendary,
        xp_reward: 500,
        requirement: Requirement::Level { level: 20 },
    },
    // ═══════════════════════════════════════════════════════════════
    // SPECIAL
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::NightOwl,
        title: "Night Owl",
        description: "Visited the portfolio during late night hours",
        icon: "🦉",
        category: AchievementCategory::Special,
        rarity: Rarity::Uncommon,
        xp_reward: 40,
        requirement: Requirement::VisitTime { hours: NIGHT_HOURS },
    },
    AchievementDef {
        id: AchievementId::EarlyBird,
        title: "Early Bird",
        description: "Visited the portfolio in the early morning",
        icon: "🐦",
        category: AchievementCategory::Special,
        rarity: Rarity::Uncommon,
        xp_reward: 40,
        requirement: Requirement::VisitTime {
            hours: MORNING_HOURS,
        },
    },
    AchievementDef {
        id: AchievementId::MobileExplorer,
        title: "Mobile Explorer",
        description: "Explored the portfolio on a mobile device",
        icon: "📱",
        category: AchievementCategory::Device,
        rarity: Rarity::Common,
        xp_reward: 30,
        requirement: Requirement::Signal {
            signal: Signal::MobileVisit,
            count: 1,
        },
    },
    AchievementDef {
        id: AchievementId::SpeedDemon,
        title: "Speed Demon",
        description: "Navigated through sections incredibly quickly",
        icon: "💨",
        category: AchievementCategory::Special,
        rarity: Rarity::Uncommon,
        xp_reward: 35,
        requirement: Requirement::FastNavigation {
            sections_per_minute: 3,
        },
    },
    AchievementDef {
        id: AchievementId::Perfectionist,
        title: "Perfectionist",
        description: "Filled out the contact form with perfect accuracy",
        icon: "✨",
        category: AchievementCategory::Special,
        rarity: Rarity::Rare,
        xp_reward: 60,
        requirement: Requirement::Signal {
            signal: Signal::PerfectForm,
            count: 1,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // SHARING
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::QuoteSharer,
        title: "Quote Sharer",
        description: "Shared a motivational quote on social media",
        icon: "📢",
        category: AchievementCategory::Sharing,
        rarity: Rarity::Uncommon,
        xp_reward: 45,
        requirement: Requirement::Signal {
            signal: Signal::QuoteShared,
            count: 1,
        },
    },
    AchievementDef {
        id: AchievementId::BrandAmbassador,
        title: "Brand Ambassador",
        description: "Shared the portfolio with others",
        icon: "🎖️",
        category: AchievementCategory::Sharing,
        rarity: Rarity::Rare,
        xp_reward: 75,
        requirement: Requirement::Signal {
            signal: Signal::PortfolioShared,
            count: 1,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // MULTIMEDIA
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::AudioEnthusiast,
        title: "Audio Enthusiast",
        description: "Enabled background music and sound effects",
        icon: "🎵",
        category: AchievementCategory::Multimedia,
        rarity: Rarity::Common,
        xp_reward: 35,
        requirement: Requirement::Signal {
            signal: Signal::AudioEnabled,
            count: 1,
        },
    },
    AchievementDef {
        id: AchievementId::VisualArtist,
        title: "Visual Artist",
        description: "Appreciated the visual effects and animations",
        icon: "🎨",
        category: AchievementCategory::Multimedia,
        rarity: Rarity::Common,
        xp_reward: 30,
        requirement: Requirement::Signal {
            signal: Signal::AnimationInteraction,
            count: 5,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // TECHNICAL
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::KeyboardNinja,
        title: "Keyboard Ninja",
        description: "Used keyboard shortcuts for navigation",
        icon: "⌨️",
        category: AchievementCategory::Technical,
        rarity: Rarity::Uncommon,
        xp_reward: 50,
        requirement: Requirement::Signal {
            signal: Signal::KeyboardShortcut,
            count: 3,
        },
    },
    AchievementDef {
        id: AchievementId::AccessibilityChampion,
        title: "Accessibility Champion",
        description: "Used accessibility features effectively",
        icon: "♿",
        category: AchievementCategory::Accessibility,
        rarity: Rarity::Rare,
        xp_reward: 60,
        requirement: Requirement::Signal {
            signal: Signal::AccessibilityFeature,
            count: 2,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // ULTIMATE
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Completionist,
        title: "Completionist",
        description: "Unlocked 80% of all available achievements",
        icon: "🏅",
        category: AchievementCategory::Ultimate,
        rarity: Rarity::Epic,
        xp_reward: 200,
        requirement: Requirement::AchievementShare { percentage: 80 },
    },
    AchievementDef {
        id: AchievementId::LegendStatus,
        title: "Legend Status",
        description: "Achieved the ultimate status",
        icon: "👑",
        category: AchievementCategory::Ultimate,
        rarity: Rarity::Legendary,
        xp_reward: 1000,
        requirement: Requirement::Ultimate {
            level: 25,
            achievements_unlocked: 30,
            time_spent_minutes: 60,
            interactions: 100,
        },
    },
];

/// Get an achievement definition by ID.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Get all achievements in a category.
pub fn get_achievements_by_category(category: AchievementCategory) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}

/// Get all achievements of a rarity.
pub fn get_achievements_by_rarity(rarity: Rarity) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.rarity == rarity)
        .collect()
}

/// Sum of every reward in the catalog.
pub fn total_possible_xp() -> u64 {
    ALL_ACHIEVEMENTS.iter().map(|a| a.xp_reward).sum()
}

/// Catalog sorted by XP reward, highest first unless `ascending`.
pub fn sorted_by_xp(ascending: bool) -> Vec<&'static AchievementDef> {
    let mut defs: Vec<_> = ALL_ACHIEVEMENTS.iter().collect();
    if ascending {
        defs.sort_by_key(|a| a.xp_reward);
    } else {
        defs.sort_by_key(|a| std::cmp::Reverse(a.xp_reward));
    }
    defs
}

pub fn rarity_distribution() -> BTreeMap<Rarity, usize> {
    let mut distribution = BTreeMap::new();
    for a in ALL_ACHIEVEMENTS {
        *distribution.entry(a.rarity).or_insert(0) += 1;
    }
    distribution
}

pub fn category_distribution() -> BTreeMap<AchievementCategory, usize> {
    let mut distribution = BTreeMap::new();
    for a in ALL_ACHIEVEMENTS {
        *distribution.entry(a.category).or_insert(0) += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_achievements_have_unique_ids() {
        use std::collections::HashSet;
        let mut ids = HashSet::new();
        for achievement in ALL_ACHIEVEMENTS {
            assert!(
                ids.insert(achievement.id),
                "Duplicate achievement ID: {:?}",
                achievement.id
            );
        }
    }

    #[test]
    fn test_get_achievement_def() {
        let def = get_achievement_def(AchievementId::Explorer).unwrap();
        assert_eq!(def.title, "Portfolio Explorer");
        assert_eq!(def.category, AchievementCategory::Exploration);
        assert_eq!(def.xp_reward, 75);
    }

    #[test]
    fn test_get_achievements_by_category() {
        let engagement = get_achievements_by_category(AchievementCategory::Engagement);
        assert_eq!(engagement.len(), 5);
        for a in engagement {
            assert_eq!(a.category, AchievementCategory::Engagement);
        }
    }

    #[test]
    fn test_distributions_cover_catalog() {
        let by_rarity: usize = rarity_distribution().values().sum();
        let by_category: usize = category_distribution().values().sum();
        assert_eq!(by_rarity, ALL_ACHIEVEMENTS.len());
        assert_eq!(by_category, ALL_ACHIEVEMENTS.len());
        assert_eq!(get_achievements_by_rarity(Rarity::Legendary).len(), 2);
    }

    #[test]
    fn test_sorted_by_xp() {
        let desc = sorted_by_xp(false);
        assert_eq!(desc[0].id, AchievementId::LegendStatus);
        let asc = sorted_by_xp(true);
        assert!(asc[0].xp_reward <= asc[asc.len() - 1].xp_reward);
    }

    #[test]
    fn test_total_possible_xp() {
        assert_eq!(total_possible_xp(), 3_690);
    }
}
