//! Daily streak state machine.
//!
//! A streak counts consecutive calendar days whose productive XP met the
//! daily threshold. Two entry points mutate it:
//!
//! - [`Streak::mark_today_qualified`] runs live, the instant today's
//!   productive XP crosses the threshold.
//! - [`Streak::evaluate_at_day_roll`] runs once per day boundary with
//!   yesterday's *finalized* productive XP (read from the archived bucket,
//!   never the live one).
//!
//! The two paths never double-count: once the live path advances
//! `last_active_date` to today, the day-roll path sees "already evaluated"
//! and leaves the streak alone.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// What a streak evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Streak extended by one day; carries the new length.
    Extended(u32),
    /// Streak restarted at 1 after a gap (or first qualification ever).
    Started,
    /// Streak broken back to 0.
    Reset,
    /// Nothing to do (already evaluated, or never active).
    NoChange,
}

/// Streak counters, embedded in the persisted aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive qualifying days, including today once today qualifies.
    #[serde(default)]
    pub current: u32,
    /// Lifetime maximum of `current`. Never decreases.
    #[serde(default)]
    pub longest: u32,
    /// Date of the last qualifying day or last day-roll evaluation.
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

impl Streak {
    /// Live qualification: today's productive XP just crossed the threshold.
    pub fn mark_today_qualified(&mut self, today: NaiveDate) -> StreakChange {
        if self.last_active_date == Some(today) {
            return StreakChange::NoChange;
        }
        let yesterday = today.checked_sub_days(Days::new(1));
        if self.last_active_date.is_some() && self.last_active_date == yesterday {
            self.current += 1;
            self.longest = self.longest.max(self.current);
            self.last_active_date = Some(today);
            StreakChange::Extended(self.current)
        } else {
            // Gap, or first qualification ever.
            self.current = 1;
            self.longest = self.longest.max(1);
            self.last_active_date = Some(today);
            StreakChange::Started
        }
    }

    /// Day-roll evaluation with yesterday's finalized productive XP.
    ///
    /// Must run before the daily bucket resets; the caller passes the
    /// archived total, so a scheduler delayed past midnight cannot hand this
    /// a zeroed bucket.
    pub fn evaluate_at_day_roll(
        &mut self,
        today: NaiveDate,
        yesterday_productive_xp: i64,
        threshold: i64,
    ) -> StreakChange {
        let Some(last) = self.last_active_date else {
            // First run ever: nothing accrued yet.
            return StreakChange::NoChange;
        };
        if last == today {
            // Live path already advanced us; suppress re-evaluation.
            return StreakChange::NoChange;
        }
        let yesterday = today.checked_sub_days(Days::new(1));
        if Some(last) == yesterday {
            if yesterday_productive_xp >= threshold {
                self.current += 1;
                self.longest = self.longest.max(self.current);
                self.last_active_date = Some(today);
                StreakChange::Extended(self.current)
            } else {
                // Threshold missed. last_active_date stays put: the live
                // qualification path owns advancing it to today.
                self.current = 0;
                StreakChange::Reset
            }
        } else {
            // More than one day gone.
            self.current = 0;
            StreakChange::Reset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn first_qualification_starts_at_one() {
        let mut streak = Streak::default();
        assert_eq!(streak.mark_today_qualified(d("2026-08-07")), StreakChange::Started);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
        assert_eq!(streak.last_active_date, Some(d("2026-08-07")));
    }

    #[test]
    fn consecutive_day_extends() {
        let mut streak = Streak {
            current: 3,
            longest: 3,
            last_active_date: Some(d("2026-08-06")),
        };
        assert_eq!(
            streak.mark_today_qualified(d("2026-08-07")),
            StreakChange::Extended(4)
        );
        assert_eq!(streak.current, 4);
        assert_eq!(streak.longest, 4);
    }

    #[test]
    fn longest_preserved_over_restart() {
        let mut streak = Streak {
            current: 9,
            longest: 9,
            last_active_date: Some(d("2026-08-01")),
        };
        // Three-day gap: restart at 1, longest stays 9.
        assert_eq!(streak.mark_today_qualified(d("2026-08-05")), StreakChange::Started);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 9);
    }

    #[test]
    fn mark_twice_same_day_is_noop() {
        let mut streak = Streak::default();
        streak.mark_today_qualified(d("2026-08-07"));
        assert_eq!(
            streak.mark_today_qualified(d("2026-08-07")),
            StreakChange::NoChange
        );
        assert_eq!(streak.current, 1);
    }

    #[test]
    fn day_roll_extends_on_qualified_yesterday() {
        let mut streak = Streak {
            current: 2,
            longest: 2,
            last_active_date: Some(d("2026-08-06")),
        };
        assert_eq!(
            streak.evaluate_at_day_roll(d("2026-08-07"), 80, 50),
            StreakChange::Extended(3)
        );
        assert_eq!(streak.last_active_date, Some(d("2026-08-07")));
    }

    #[test]
    fn day_roll_resets_on_missed_threshold_without_advancing_date() {
        let mut streak = Streak {
            current: 5,
            longest: 7,
            last_active_date: Some(d("2026-08-06")),
        };
        assert_eq!(
            streak.evaluate_at_day_roll(d("2026-08-07"), 20, 50),
            StreakChange::Reset
        );
        assert_eq!(streak.current, 0);
        assert_eq!(streak.longest, 7);
        // Date untouched: the live path owns advancing it.
        assert_eq!(streak.last_active_date, Some(d("2026-08-06")));
    }

    #[test]
    fn day_roll_resets_on_multi_day_gap() {
        let mut streak = Streak {
            current: 4,
            longest: 4,
            last_active_date: Some(d("2026-08-01")),
        };
        assert_eq!(
            streak.evaluate_at_day_roll(d("2026-08-07"), 500, 50),
            StreakChange::Reset
        );
        assert_eq!(streak.current, 0);
    }

    #[test]
    fn day_roll_noop_on_first_run() {
        let mut streak = Streak::default();
        assert_eq!(
            streak.evaluate_at_day_roll(d("2026-08-07"), 0, 50),
            StreakChange::NoChange
        );
        assert_eq!(streak.current, 0);
    }

    #[test]
    fn no_double_count_same_day() {
        // Qualify live, then run the day-roll path on the same day with the
        // resulting state: no further change.
        let mut streak = Streak {
            current: 3,
            longest: 3,
            last_active_date: Some(d("2026-08-06")),
        };
        streak.mark_today_qualified(d("2026-08-07"));
        let snapshot = streak.clone();
        assert_eq!(
            streak.evaluate_at_day_roll(d("2026-08-07"), 120, 50),
            StreakChange::NoChange
        );
        assert_eq!(streak, snapshot);
    }
}
