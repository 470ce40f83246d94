//! Dashboard projection.
//!
//! A read-only view of the aggregate plus the derived display fields the
//! dashboard needs: rank and prestige, progress toward the next level,
//! trend against yesterday, next milestone, top domains, badge grid.
//! Produced on demand, not per tick.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::achievements::{AchievementTier, ACHIEVEMENTS};
use crate::progression::{
    level_from_xp, next_milestone, prestige_tier, progress_percent, rank_title,
};
use crate::state::ProgressionState;
use crate::stats::{top_domains, FocusGrade};

/// Focus trend against yesterday's final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Score delta below which the trend reads as flat.
const TREND_DEADBAND: i16 = 3;

/// One badge-grid entry. Hidden achievements keep their title and
/// description masked until unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementView {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: AchievementTier,
    pub unlocked: bool,
    pub unlocked_at: Option<NaiveDateTime>,
}

/// Today's totals, ready to chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodaySummary {
    pub date: Option<NaiveDate>,
    pub productive_xp: i64,
    pub distracting_xp: i64,
    pub neutral_xp: i64,
    pub productive_minutes: u64,
    pub distracting_minutes: u64,
    pub neutral_minutes: u64,
}

/// A ranked domain row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopDomain {
    pub domain: String,
    pub total_xp: i64,
    pub total_minutes: u64,
    pub visits: u64,
}

/// The full dashboard projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub level: u32,
    pub rank_title: &'static str,
    pub prestige: &'static str,
    /// Percent progress toward the next level.
    pub level_progress: u8,
    pub xp: i64,
    pub total_xp_earned: u64,
    pub total_minutes_tracked: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub combo_multiplier: f64,
    pub highest_combo: u32,
    pub perfect_week_days: u32,
    pub today: TodaySummary,
    pub focus_score: u8,
    pub focus_grade: FocusGrade,
    pub trend: Trend,
    pub next_milestone: Option<(u64, &'static str)>,
    pub top_domains: Vec<TopDomain>,
    pub achievements: Vec<AchievementView>,
    pub achievements_unlocked: u32,
}

impl DashboardSnapshot {
    pub fn project(state: &ProgressionState) -> Self {
        let level = level_from_xp(state.total_xp_earned).max(state.level);
        let score = state.focus_score.score;

        let trend = match state.daily_history.back() {
            None => Trend::Flat,
            Some(yesterday) => {
                let diff = score as i16 - yesterday.focus_score as i16;
                if diff > TREND_DEADBAND {
                    Trend::Up
                } else if diff < -TREND_DEADBAND {
                    Trend::Down
                } else {
                    Trend::Flat
                }
            }
        };

        let achievements: Vec<AchievementView> = ACHIEVEMENTS
            .iter()
            .map(|def| {
                let record = state.achievements.get(def.id);
                let unlocked = record.map(|r| r.unlocked).unwrap_or(false);
                let masked = def.hidden && !unlocked;
                AchievementView {
                    id: def.id,
                    title: if masked { "???" } else { def.title },
                    description: if masked {
                        "Hidden achievement"
                    } else {
                        def.description
                    },
                    tier: def.tier,
                    unlocked,
                    unlocked_at: record.and_then(|r| r.unlocked_at),
                }
            })
            .collect();
        let achievements_unlocked = achievements.iter().filter(|a| a.unlocked).count() as u32;

        Self {
            level,
            rank_title: rank_title(level),
            prestige: prestige_tier(level),
            level_progress: progress_percent(state.total_xp_earned, level),
            xp: state.xp,
            total_xp_earned: state.total_xp_earned,
            total_minutes_tracked: state.total_minutes_tracked,
            current_streak: state.streak.current,
            longest_streak: state.streak.longest,
            combo_multiplier: state.combo.current_multiplier,
            highest_combo: state.combo.highest_combo,
            perfect_week_days: state.perfect_week_days,
            today: TodaySummary {
                date: state.daily.date,
                productive_xp: state.daily.productive_xp,
                distracting_xp: state.daily.distracting_xp,
                neutral_xp: state.daily.neutral_xp,
                productive_minutes: state.daily.productive_minutes,
                distracting_minutes: state.daily.distracting_minutes,
                neutral_minutes: state.daily.neutral_minutes,
            },
            focus_score: score,
            focus_grade: state.focus_score.grade(),
            trend,
            next_milestone: next_milestone(state.total_xp_earned)
                .map(|m| (m.threshold, m.label)),
            top_domains: top_domains(&state.domain_stats, 5)
                .into_iter()
                .map(|(domain, s)| TopDomain {
                    domain,
                    total_xp: s.total_xp,
                    total_minutes: s.total_minutes,
                    visits: s.visits,
                })
                .collect(),
            achievements,
            achievements_unlocked,
        }
    }
}
