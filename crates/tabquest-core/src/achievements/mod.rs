//! Achievement system: static catalog, stats snapshot, idempotent evaluator.
//!
//! Conditions are small pure predicates over a [`StatsSnapshot`]; they never
//! read engine state directly, which keeps evaluation replay-safe. Unlocks
//! are monotone: the evaluator never re-fires an unlocked id and never
//! revokes one.

mod catalog;
mod evaluator;

pub use catalog::{
    all_achievements, find_achievement, AchievementDef, AchievementTier, ACHIEVEMENTS,
};
pub use evaluator::{evaluate, Evaluation};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Persisted unlock entry. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_at: Option<NaiveDateTime>,
}

/// Everything achievement conditions may look at, derived from the
/// aggregate once per tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_xp_earned: u64,
    pub total_minutes_tracked: u64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub today_productive_xp: i64,
    pub today_productive_minutes: u64,
    pub current_combo_multiplier: f64,
    pub highest_combo: u32,
    pub focus_score: u8,
    pub longest_session_secs: u64,
    pub unique_productive_domains_today: u32,
    pub early_bird_days: u32,
    pub night_owl_days: u32,
    pub perfect_week_days: u32,
    /// Achievements already unlocked (for meta-achievements).
    pub achievements_unlocked: u32,
}
