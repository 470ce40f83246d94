//! Calendar-day rollover.
//!
//! Runs at most once per day boundary, before anything else in the tick.
//! The outgoing bucket is read and archived *before* any reset, in one state
//! transition: a scheduler delayed past midnight can never observe a zeroed
//! bucket when evaluating yesterday's streak.

use chrono::NaiveDate;

use crate::progression::StreakChange;
use crate::state::{DailyBucket, DayRecord, ProgressionState};
use crate::stats::FocusScore;
use crate::storage::Settings;

/// What a day roll did.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRollOutcome {
    /// The finalized outgoing day.
    pub archived: DayRecord,
    /// How the streak evaluation landed.
    pub streak_change: StreakChange,
}

/// Roll the daily bucket if the calendar date advanced.
///
/// Returns `None` when nothing had to roll (same day, or very first tick,
/// which only stamps the bucket).
pub fn roll_if_needed(
    state: &mut ProgressionState,
    today: NaiveDate,
    settings: &Settings,
) -> Option<DayRollOutcome> {
    match state.daily.date {
        None => {
            // First tick ever: stamp the bucket, nothing to finalize.
            state.daily.date = Some(today);
            None
        }
        Some(date) if date == today => None,
        Some(date) => {
            let outcome = finalize_day(state, date, today, settings);
            Some(outcome)
        }
    }
}

fn finalize_day(
    state: &mut ProgressionState,
    outgoing: NaiveDate,
    today: NaiveDate,
    settings: &Settings,
) -> DayRollOutcome {
    // Archive the outgoing bucket by value before any counter is touched.
    let bucket = std::mem::take(&mut state.daily);
    let record = DayRecord {
        date: outgoing,
        productive_xp: bucket.productive_xp,
        distracting_xp: bucket.distracting_xp,
        neutral_xp: bucket.neutral_xp,
        productive_minutes: bucket.productive_minutes,
        distracting_minutes: bucket.distracting_minutes,
        neutral_minutes: bucket.neutral_minutes,
        focus_score: state.focus_score.score,
    };
    state.archive_day(record.clone());

    // Perfect-week chain: the finalized day must meet the focus goal, and
    // no day may be skipped entirely.
    let gap_days = (today - outgoing).num_days();
    if gap_days > 1 || record.focus_score < settings.focus_goal {
        state.perfect_week_days = 0;
    } else {
        state.perfect_week_days += 1;
    }

    // Streak evaluation reads the archived record, never the live bucket.
    // A multi-day gap resets inside the evaluator regardless of the XP
    // passed here.
    let yesterday_xp = if gap_days == 1 { record.productive_xp } else { 0 };
    let streak_change =
        state
            .streak
            .evaluate_at_day_roll(today, yesterday_xp, settings.daily_xp_goal);

    // Now the resets: fresh bucket, cleared heatmap and score history.
    state.daily = DailyBucket {
        date: Some(today),
        ..DailyBucket::default()
    };
    state.heatmap.reset();
    state.today_focus_scores.clear();
    state.focus_score = FocusScore::default();

    log::info!(
        "day rolled {outgoing} -> {today}: {} productive XP archived, streak {:?}",
        record.productive_xp,
        streak_change
    );

    DayRollOutcome {
        archived: record,
        streak_change,
    }
}
