//! The persisted progression aggregate.
//!
//! One `ProgressionState` per user, read and written whole by the tick
//! orchestrator. Every field tolerates being absent in stored data: partial
//! state from an older version (or a first run) deserializes to the
//! documented defaults instead of leaking `None` into arithmetic.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::achievements::UnlockRecord;
use crate::progression::Streak;
use crate::stats::{DomainStats, FocusScore, HourlyHeatmap};
use crate::tick::Session;

/// Completed sessions kept in the recent ring.
pub const RECENT_SESSIONS_MAX: usize = 50;
/// Finalized day records kept in the archive ring.
pub const DAILY_HISTORY_MAX: usize = 90;
/// Focus-score samples kept for the current day.
pub const FOCUS_HISTORY_MAX: usize = 240;
/// Level-up records kept.
pub const LEVEL_UPS_MAX: usize = 100;

/// Today's accumulation bucket. Exactly one is active; the Day-Roll
/// Evaluator archives and replaces it exactly once per calendar-day
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Calendar date this bucket belongs to. `None` only before the very
    /// first tick.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub productive_xp: i64,
    #[serde(default)]
    pub distracting_xp: i64,
    #[serde(default)]
    pub neutral_xp: i64,
    #[serde(default)]
    pub productive_minutes: u64,
    #[serde(default)]
    pub distracting_minutes: u64,
    #[serde(default)]
    pub neutral_minutes: u64,
    /// Distinct productive domains seen today.
    #[serde(default)]
    pub productive_domains: BTreeSet<String>,
}

/// A finalized day, written by the Day-Roll Evaluator before the bucket
/// resets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub productive_xp: i64,
    pub distracting_xp: i64,
    pub neutral_xp: i64,
    pub productive_minutes: u64,
    pub distracting_minutes: u64,
    pub neutral_minutes: u64,
    /// The day's final focus score.
    pub focus_score: u8,
}

/// Combo accumulators. The productive counter and the distracting counter
/// are mutually exclusive: each is reset by the opposite category's
/// observation; neutral touches neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    #[serde(default)]
    pub consecutive_productive_minutes: u32,
    #[serde(default = "default_multiplier")]
    pub current_multiplier: f64,
    /// Lifetime maximum of the productive counter.
    #[serde(default)]
    pub highest_combo: u32,
    #[serde(default)]
    pub consecutive_distracting_ticks: u32,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            consecutive_productive_minutes: 0,
            current_multiplier: 1.0,
            highest_combo: 0,
            consecutive_distracting_ticks: 0,
        }
    }
}

/// One level crossing, one record per level even on multi-level jumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpRecord {
    pub level: u32,
    pub at: NaiveDateTime,
}

/// The single persisted aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Spendable/display XP. Floored at zero, uncapped above.
    #[serde(default)]
    pub xp: i64,
    /// Current level, derived from `total_xp_earned`. Never decreases.
    #[serde(default = "default_level")]
    pub level: u32,
    /// Lifetime sum of positive XP deltas. Monotonically non-decreasing.
    #[serde(default)]
    pub total_xp_earned: u64,
    /// Lifetime tick count.
    #[serde(default)]
    pub total_minutes_tracked: u64,

    #[serde(default)]
    pub daily: DailyBucket,
    #[serde(default)]
    pub streak: Streak,
    #[serde(default)]
    pub combo: ComboState,

    #[serde(default)]
    pub heatmap: HourlyHeatmap,
    #[serde(default)]
    pub domain_stats: BTreeMap<String, DomainStats>,
    #[serde(default)]
    pub focus_score: FocusScore,
    /// Today's focus-score samples, oldest first, bounded.
    #[serde(default)]
    pub today_focus_scores: VecDeque<u8>,
    /// Consecutive days whose final focus score met the focus goal.
    #[serde(default)]
    pub perfect_week_days: u32,
    #[serde(default)]
    pub early_bird_days: u32,
    #[serde(default)]
    pub last_early_bird_date: Option<NaiveDate>,
    #[serde(default)]
    pub night_owl_days: u32,
    #[serde(default)]
    pub last_night_owl_date: Option<NaiveDate>,

    /// Unlock map. Append-only: once unlocked an id is never revisited.
    #[serde(default)]
    pub achievements: BTreeMap<String, UnlockRecord>,

    /// At most one open session, owned by the tick/tab-switch path.
    #[serde(default)]
    pub current_session: Option<Session>,
    /// Completed sessions, newest last, bounded.
    #[serde(default)]
    pub recent_sessions: VecDeque<Session>,
    /// Lifetime longest completed session.
    #[serde(default)]
    pub longest_session_secs: u64,

    /// Finalized days, newest last, bounded.
    #[serde(default)]
    pub daily_history: VecDeque<DayRecord>,
    /// Level crossings, newest last, bounded.
    #[serde(default)]
    pub level_ups: Vec<LevelUpRecord>,
}

fn default_level() -> u32 {
    1
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            total_xp_earned: 0,
            total_minutes_tracked: 0,
            daily: DailyBucket::default(),
            streak: Streak::default(),
            combo: ComboState::default(),
            heatmap: HourlyHeatmap::default(),
            domain_stats: BTreeMap::new(),
            focus_score: FocusScore::default(),
            today_focus_scores: VecDeque::new(),
            perfect_week_days: 0,
            early_bird_days: 0,
            last_early_bird_date: None,
            night_owl_days: 0,
            last_night_owl_date: None,
            achievements: BTreeMap::new(),
            current_session: None,
            recent_sessions: VecDeque::new(),
            longest_session_secs: 0,
            daily_history: VecDeque::new(),
            level_ups: Vec::new(),
        }
    }
}

impl ProgressionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a signed XP delta: display XP floors at zero, positive deltas
    /// also accrue to the lifetime total.
    pub fn apply_xp(&mut self, delta: i64) {
        self.xp = (self.xp + delta).max(0);
        if delta > 0 {
            self.total_xp_earned += delta as u64;
        }
    }

    /// Push a focus-score sample into today's bounded history.
    pub fn record_focus_sample(&mut self, score: u8) {
        self.today_focus_scores.push_back(score);
        while self.today_focus_scores.len() > FOCUS_HISTORY_MAX {
            self.today_focus_scores.pop_front();
        }
    }

    /// Append a finalized day record, bounded.
    pub fn archive_day(&mut self, record: DayRecord) {
        self.daily_history.push_back(record);
        while self.daily_history.len() > DAILY_HISTORY_MAX {
            self.daily_history.pop_front();
        }
    }

    /// Append a completed session, bounded, tracking the lifetime longest.
    pub fn archive_session(&mut self, session: Session) {
        self.longest_session_secs = self.longest_session_secs.max(session.duration_secs);
        self.recent_sessions.push_back(session);
        while self.recent_sessions.len() > RECENT_SESSIONS_MAX {
            self.recent_sessions.pop_front();
        }
    }

    /// Record one level crossing.
    pub fn record_level_up(&mut self, level: u32, at: NaiveDateTime) {
        self.level_ups.push(LevelUpRecord { level, at });
        if self.level_ups.len() > LEVEL_UPS_MAX {
            let excess = self.level_ups.len() - LEVEL_UPS_MAX;
            self.level_ups.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_sane() {
        let state = ProgressionState::new();
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
        assert_eq!(state.combo.current_multiplier, 1.0);
        assert!(state.daily.date.is_none());
    }

    #[test]
    fn apply_xp_floors_at_zero() {
        let mut state = ProgressionState::new();
        state.apply_xp(-25);
        assert_eq!(state.xp, 0);
        assert_eq!(state.total_xp_earned, 0);
    }

    #[test]
    fn apply_xp_accrues_lifetime_only_on_gains() {
        let mut state = ProgressionState::new();
        state.apply_xp(30);
        state.apply_xp(-10);
        state.apply_xp(5);
        assert_eq!(state.xp, 25);
        assert_eq!(state.total_xp_earned, 35);
    }

    #[test]
    fn partial_persisted_state_deserializes_with_defaults() {
        // Only a couple of fields present, as after a version upgrade.
        let json = r#"{"xp": 42, "total_xp_earned": 42}"#;
        let state: ProgressionState = serde_json::from_str(json).unwrap();
        assert_eq!(state.xp, 42);
        assert_eq!(state.level, 1);
        assert_eq!(state.combo.current_multiplier, 1.0);
        assert!(state.achievements.is_empty());
        assert!(state.current_session.is_none());
    }

    #[test]
    fn focus_history_is_bounded() {
        let mut state = ProgressionState::new();
        for i in 0..(FOCUS_HISTORY_MAX + 10) {
            state.record_focus_sample((i % 100) as u8);
        }
        assert_eq!(state.today_focus_scores.len(), FOCUS_HISTORY_MAX);
    }

    #[test]
    fn state_roundtrips_through_json() {
        let mut state = ProgressionState::new();
        state.apply_xp(120);
        state.daily.date = Some("2026-08-07".parse().unwrap());
        state.daily.productive_xp = 120;
        let blob = serde_json::to_string(&state).unwrap();
        let back: ProgressionState = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, state);
    }
}
