//! Progression events.
//!
//! Every threshold crossed during a tick produces an `Event`. Each variant
//! carries exactly the fields its notification needs; the single exhaustive
//! [`Event::to_notification`] mapping turns a variant into a renderable
//! payload, so a missing field is a compile error rather than a runtime
//! surprise.
//!
//! The renderer consumes payloads and has no channel back into the core;
//! delivery failures are cosmetic and never roll back a tick.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::achievements::AchievementTier;
use crate::classify::Category;
use crate::progression::XpBreakdown;

/// Display priority. Orders by urgency: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Everything the tick engine can report upward.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Base XP gained this minute, with the full layer trace.
    XpGained {
        amount: i64,
        category: Category,
        domain: String,
        breakdown: XpBreakdown,
        at: NaiveDateTime,
    },
    /// XP lost this minute (distracting domain).
    XpLost {
        amount: i64,
        domain: String,
        at: NaiveDateTime,
    },
    /// The combo counter entered a new tier this minute.
    ComboTierReached {
        minutes: u32,
        multiplier: f64,
        label: String,
        at: NaiveDateTime,
    },
    /// Consecutive distracting minutes reached the warning threshold.
    DistractionWarning {
        consecutive_minutes: u32,
        domain: String,
        at: NaiveDateTime,
    },
    /// A level boundary was crossed. Emitted once per level, including every
    /// intermediate level on a multi-level jump.
    LevelUp {
        level: u32,
        title: String,
        at: NaiveDateTime,
    },
    /// Today's productive XP met the daily goal.
    StreakQualified {
        days: u32,
        at: NaiveDateTime,
    },
    /// A lifetime-XP milestone was crossed.
    MilestoneReached {
        threshold: u64,
        label: String,
        at: NaiveDateTime,
    },
    /// An achievement unlocked.
    AchievementUnlocked {
        id: String,
        title: String,
        tier: AchievementTier,
        xp_reward: i64,
        at: NaiveDateTime,
    },
}

/// Renderable toast payload: the renderer shows it and auto-dismisses after
/// `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    /// Stable type tag, also the dedup key.
    pub kind: &'static str,
    pub title: String,
    pub subtitle: String,
    pub icon: &'static str,
    pub color: &'static str,
    pub priority: Priority,
    pub duration_ms: u32,
}

/// Minimal projection for an icon/badge renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSummary {
    pub level: u32,
    pub last_category: Category,
}

impl Event {
    /// Stable type tag used for dedup cooldowns.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::XpGained { .. } => "xp_gained",
            Event::XpLost { .. } => "xp_lost",
            Event::ComboTierReached { .. } => "combo_tier",
            Event::DistractionWarning { .. } => "distraction_warning",
            Event::LevelUp { .. } => "level_up",
            Event::StreakQualified { .. } => "streak_qualified",
            Event::MilestoneReached { .. } => "milestone",
            Event::AchievementUnlocked { .. } => "achievement_unlocked",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Event::XpGained { .. } | Event::XpLost { .. } => Priority::Low,
            Event::ComboTierReached { .. } | Event::DistractionWarning { .. } => {
                Priority::Medium
            }
            Event::StreakQualified { .. } | Event::MilestoneReached { .. } => Priority::High,
            Event::LevelUp { .. } => Priority::Critical,
            Event::AchievementUnlocked { tier, .. } => match tier {
                AchievementTier::Gold | AchievementTier::Platinum => Priority::Critical,
                _ => Priority::High,
            },
        }
    }

    pub fn at(&self) -> NaiveDateTime {
        match self {
            Event::XpGained { at, .. }
            | Event::XpLost { at, .. }
            | Event::ComboTierReached { at, .. }
            | Event::DistractionWarning { at, .. }
            | Event::LevelUp { at, .. }
            | Event::StreakQualified { at, .. }
            | Event::MilestoneReached { at, .. }
            | Event::AchievementUnlocked { at, .. } => *at,
        }
    }

    /// Build the toast payload for this event.
    pub fn to_notification(&self) -> NotificationPayload {
        let priority = self.priority();
        let kind = self.kind();
        match self {
            Event::XpGained {
                amount, domain, ..
            } => NotificationPayload {
                kind,
                title: format!("+{amount} XP"),
                subtitle: domain.clone(),
                icon: "sparkles",
                color: "#22c55e",
                priority,
                duration_ms: 2_000,
            },
            Event::XpLost { amount, domain, .. } => NotificationPayload {
                kind,
                title: format!("-{amount} XP"),
                subtitle: domain.clone(),
                icon: "trending-down",
                color: "#ef4444",
                priority,
                duration_ms: 2_000,
            },
            Event::ComboTierReached {
                minutes,
                multiplier,
                label,
                ..
            } => NotificationPayload {
                kind,
                title: format!("{label}! x{multiplier:.2}"),
                subtitle: format!("{minutes} productive minutes in a row"),
                icon: "flame",
                color: "#f97316",
                priority,
                duration_ms: 4_000,
            },
            Event::DistractionWarning {
                consecutive_minutes,
                domain,
                ..
            } => NotificationPayload {
                kind,
                title: "Losing focus?".to_string(),
                subtitle: format!("{consecutive_minutes} minutes on {domain}"),
                icon: "alert-triangle",
                color: "#eab308",
                priority,
                duration_ms: 5_000,
            },
            Event::LevelUp { level, title, .. } => NotificationPayload {
                kind,
                title: format!("Level {level}!"),
                subtitle: title.clone(),
                icon: "arrow-up-circle",
                color: "#a855f7",
                priority,
                duration_ms: 6_000,
            },
            Event::StreakQualified { days, .. } => NotificationPayload {
                kind,
                title: format!("{days}-day streak!"),
                subtitle: "Daily goal reached".to_string(),
                icon: "calendar-check",
                color: "#3b82f6",
                priority,
                duration_ms: 5_000,
            },
            Event::MilestoneReached { threshold, label, .. } => NotificationPayload {
                kind,
                title: label.clone(),
                subtitle: format!("{threshold} lifetime XP"),
                icon: "trophy",
                color: "#fbbf24",
                priority,
                duration_ms: 5_000,
            },
            Event::AchievementUnlocked {
                title, xp_reward, ..
            } => NotificationPayload {
                kind,
                title: format!("Achievement: {title}"),
                subtitle: format!("+{xp_reward} bonus XP"),
                icon: "award",
                color: "#fbbf24",
                priority,
                duration_ms: 6_000,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> NaiveDateTime {
        "2026-08-07T10:30:00".parse().unwrap()
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn level_up_is_critical() {
        let event = Event::LevelUp {
            level: 5,
            title: "Apprentice".to_string(),
            at: at(),
        };
        assert_eq!(event.priority(), Priority::Critical);
        let note = event.to_notification();
        assert_eq!(note.kind, "level_up");
        assert!(note.title.contains('5'));
    }

    #[test]
    fn achievement_priority_scales_with_tier() {
        let bronze = Event::AchievementUnlocked {
            id: "first_100_xp".to_string(),
            title: "Centurion".to_string(),
            tier: AchievementTier::Bronze,
            xp_reward: 25,
            at: at(),
        };
        let gold = Event::AchievementUnlocked {
            id: "streak_30".to_string(),
            title: "Monthly Master".to_string(),
            tier: AchievementTier::Gold,
            xp_reward: 200,
            at: at(),
        };
        assert_eq!(bronze.priority(), Priority::High);
        assert_eq!(gold.priority(), Priority::Critical);
    }

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::StreakQualified { days: 4, at: at() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "StreakQualified");
        assert_eq!(json["days"], 4);
    }
}
