//! The achievement catalog.
//!
//! Ids are stable snake_case strings; the catalog is the canonical source of
//! truth for the dashboard's badge grid. Hidden achievements keep their
//! title/description out of the UI until unlocked -- that is a rendering
//! concern; the evaluator treats every definition uniformly.

use serde::{Deserialize, Serialize};

use super::StatsSnapshot;

/// Reward tier, also drives notification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// One static achievement definition.
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: AchievementTier,
    pub xp_reward: i64,
    pub hidden: bool,
    /// Pure predicate over the snapshot. Must not read anything else.
    pub condition: fn(&StatsSnapshot) -> bool,
}

use AchievementTier::{Bronze, Gold, Platinum, Silver};

/// All achievement definitions.
pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_tick",
        title: "First Steps",
        description: "Track your first minute of browsing.",
        tier: Bronze,
        xp_reward: 10,
        hidden: false,
        condition: |s| s.total_minutes_tracked >= 1,
    },
    AchievementDef {
        id: "first_100_xp",
        title: "Centurion",
        description: "Earn 100 lifetime XP.",
        tier: Bronze,
        xp_reward: 25,
        hidden: false,
        condition: |s| s.total_xp_earned >= 100,
    },
    AchievementDef {
        id: "xp_1k",
        title: "Rising Star",
        description: "Earn 1,000 lifetime XP.",
        tier: Silver,
        xp_reward: 50,
        hidden: false,
        condition: |s| s.total_xp_earned >= 1_000,
    },
    AchievementDef {
        id: "xp_10k",
        title: "XP Machine",
        description: "Earn 10,000 lifetime XP.",
        tier: Gold,
        xp_reward: 150,
        hidden: false,
        condition: |s| s.total_xp_earned >= 10_000,
    },
    AchievementDef {
        id: "xp_100k",
        title: "Six Figures",
        description: "Earn 100,000 lifetime XP.",
        tier: Platinum,
        xp_reward: 500,
        hidden: false,
        condition: |s| s.total_xp_earned >= 100_000,
    },
    AchievementDef {
        id: "level_5",
        title: "Moving Up",
        description: "Reach level 5.",
        tier: Bronze,
        xp_reward: 25,
        hidden: false,
        condition: |s| s.level >= 5,
    },
    AchievementDef {
        id: "level_10",
        title: "Double Digits",
        description: "Reach level 10.",
        tier: Silver,
        xp_reward: 75,
        hidden: false,
        condition: |s| s.level >= 10,
    },
    AchievementDef {
        id: "level_25",
        title: "Quarter Century",
        description: "Reach level 25.",
        tier: Gold,
        xp_reward: 200,
        hidden: false,
        condition: |s| s.level >= 25,
    },
    AchievementDef {
        id: "streak_3",
        title: "Back Tomorrow",
        description: "Hit your daily goal 3 days in a row.",
        tier: Bronze,
        xp_reward: 25,
        hidden: false,
        condition: |s| s.current_streak >= 3,
    },
    AchievementDef {
        id: "streak_7",
        title: "Week Warrior",
        description: "Hit your daily goal 7 days in a row.",
        tier: Silver,
        xp_reward: 75,
        hidden: false,
        condition: |s| s.current_streak >= 7,
    },
    AchievementDef {
        id: "streak_30",
        title: "Monthly Master",
        description: "Hit your daily goal 30 days in a row.",
        tier: Gold,
        xp_reward: 250,
        hidden: false,
        condition: |s| s.current_streak >= 30,
    },
    AchievementDef {
        id: "combo_30",
        title: "In The Zone",
        description: "Stay productive for 30 consecutive minutes.",
        tier: Silver,
        xp_reward: 50,
        hidden: false,
        condition: |s| s.highest_combo >= 30,
    },
    AchievementDef {
        id: "combo_60",
        title: "Deep Flow",
        description: "Stay productive for a full hour straight.",
        tier: Gold,
        xp_reward: 150,
        hidden: false,
        condition: |s| s.highest_combo >= 60,
    },
    AchievementDef {
        id: "focused_hour",
        title: "Focused Hour",
        description: "Accumulate 60 productive minutes in one day.",
        tier: Bronze,
        xp_reward: 20,
        hidden: false,
        condition: |s| s.today_productive_minutes >= 60,
    },
    AchievementDef {
        id: "marathon_session",
        title: "Marathon",
        description: "Keep a single session going for two hours.",
        tier: Silver,
        xp_reward: 75,
        hidden: false,
        condition: |s| s.longest_session_secs >= 7_200,
    },
    AchievementDef {
        id: "early_riser",
        title: "Early Riser",
        description: "Be productive in the early morning on 5 different days.",
        tier: Silver,
        xp_reward: 50,
        hidden: false,
        condition: |s| s.early_bird_days >= 5,
    },
    AchievementDef {
        id: "night_shift",
        title: "Night Shift",
        description: "Be productive late at night on 5 different days.",
        tier: Silver,
        xp_reward: 50,
        hidden: true,
        condition: |s| s.night_owl_days >= 5,
    },
    AchievementDef {
        id: "perfect_week",
        title: "Perfect Week",
        description: "Score 80+ focus every day for a week.",
        tier: Gold,
        xp_reward: 300,
        hidden: false,
        condition: |s| s.perfect_week_days >= 7,
    },
    AchievementDef {
        id: "explorer",
        title: "Explorer",
        description: "Visit 5 different productive domains in one day.",
        tier: Bronze,
        xp_reward: 20,
        hidden: false,
        condition: |s| s.unique_productive_domains_today >= 5,
    },
    AchievementDef {
        id: "laser_focus",
        title: "Laser Focus",
        description: "Reach a focus score of 90.",
        tier: Silver,
        xp_reward: 60,
        hidden: false,
        condition: |s| s.focus_score >= 90,
    },
    AchievementDef {
        id: "dedicated_1k",
        title: "Dedicated",
        description: "Track 1,000 lifetime minutes.",
        tier: Silver,
        xp_reward: 100,
        hidden: false,
        condition: |s| s.total_minutes_tracked >= 1_000,
    },
    AchievementDef {
        id: "completionist",
        title: "Completionist",
        description: "Unlock 15 other achievements.",
        tier: Platinum,
        xp_reward: 500,
        hidden: true,
        condition: |s| s.achievements_unlocked >= 15,
    },
];

/// All definitions, in catalog order.
pub fn all_achievements() -> &'static [AchievementDef] {
    ACHIEVEMENTS
}

/// Look up a definition by id.
pub fn find_achievement(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}
