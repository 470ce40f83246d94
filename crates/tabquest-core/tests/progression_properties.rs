//! Property tests for the progression math and the tick pipeline's core
//! invariants.

use proptest::prelude::*;

use tabquest_core::achievements::{evaluate, StatsSnapshot};
use tabquest_core::classify::Category;
use tabquest_core::progression::{
    calculate_tick_xp, combo_tier, level_from_xp, xp_for_level, TICK_XP_CAP,
    XP_RATE_DISTRACTING,
};
use tabquest_core::state::ProgressionState;
use tabquest_core::storage::Settings;
use tabquest_core::tick::{evaluate_tick, TickContext};

proptest! {
    #[test]
    fn combo_multiplier_is_monotone(a in 0u32..300, b in 0u32..300) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(combo_tier(lo).multiplier <= combo_tier(hi).multiplier);
    }

    #[test]
    fn level_thresholds_round_trip(level in 2u32..100) {
        let threshold = xp_for_level(level);
        prop_assert_eq!(level_from_xp(threshold), level);
        prop_assert_eq!(level_from_xp(threshold - 1), level - 1);
    }

    #[test]
    fn xp_floor_and_lifetime_monotonicity(deltas in prop::collection::vec(-60i64..80, 1..200)) {
        let mut state = ProgressionState::new();
        let mut prev_total = state.total_xp_earned;
        for delta in deltas {
            state.apply_xp(delta);
            prop_assert!(state.xp >= 0);
            prop_assert!(state.total_xp_earned >= prev_total);
            prev_total = state.total_xp_earned;
        }
    }

    #[test]
    fn distracting_output_ignores_combo_and_streak(
        multiplier in 1.0f64..4.0,
        streak in 0u32..400,
        hour in 0u32..24,
    ) {
        let xp = calculate_tick_xp(Category::Distracting, multiplier, streak, hour);
        prop_assert_eq!(xp.total, XP_RATE_DISTRACTING);
    }

    #[test]
    fn positive_tick_xp_never_exceeds_cap(
        multiplier in 1.0f64..6.0,
        streak in 0u32..400,
        hour in 0u32..24,
    ) {
        let xp = calculate_tick_xp(Category::Productive, multiplier, streak, hour);
        prop_assert!(xp.total <= TICK_XP_CAP);
        prop_assert!(xp.total > 0);
    }

    #[test]
    fn achievement_evaluation_is_idempotent(
        total_xp in 0u64..200_000,
        minutes in 0u64..5_000,
        level in 1u32..60,
        streak in 0u32..50,
        combo in 0u32..120,
        focus in 0u8..101,
    ) {
        let snapshot = StatsSnapshot {
            total_xp_earned: total_xp,
            total_minutes_tracked: minutes,
            level,
            current_streak: streak,
            longest_streak: streak,
            highest_combo: combo,
            focus_score: focus,
            ..Default::default()
        };
        let now = "2026-08-07T12:00:00".parse().unwrap();
        let mut map = std::collections::BTreeMap::new();
        evaluate(&snapshot, &mut map, now);
        let second = evaluate(&snapshot, &mut map, now);
        prop_assert!(second.newly_unlocked.is_empty());
        prop_assert_eq!(second.bonus_xp, 0);
    }

    #[test]
    fn tick_sequences_preserve_monotone_counters(
        choices in prop::collection::vec(0usize..4, 1..150),
    ) {
        // 0: productive, 1: neutral, 2: distracting, 3: idle (no-op)
        let urls = [
            Some("https://github.com/rust-lang/rust"),
            Some("https://example.org/docs"),
            Some("https://youtube.com/watch?v=x"),
            None,
        ];
        let settings = Settings::default();
        let mut state = ProgressionState::new();
        let base: chrono::NaiveDateTime = "2026-08-07T09:00:00".parse().unwrap();

        let mut prev_total = 0u64;
        let mut prev_longest = 0u32;
        let mut prev_minutes = 0u64;
        for (i, choice) in choices.iter().enumerate() {
            let ctx = TickContext {
                url: urls[*choice].map(str::to_string),
                user_active: *choice != 3,
                now: base + chrono::Duration::minutes(i as i64),
            };
            if let Some(outcome) = evaluate_tick(&ctx, &state, &settings) {
                state = outcome.state;
            }
            prop_assert!(state.xp >= 0);
            prop_assert!(state.total_xp_earned >= prev_total);
            prop_assert!(state.streak.longest >= prev_longest);
            prop_assert!(state.streak.longest >= state.streak.current);
            prop_assert!(state.total_minutes_tracked >= prev_minutes);
            prev_total = state.total_xp_earned;
            prev_longest = state.streak.longest;
            prev_minutes = state.total_minutes_tracked;
        }
    }
}
