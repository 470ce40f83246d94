//! Achievement evaluation.
//!
//! Scans the catalog against a stats snapshot and the persisted unlock map.
//! Guarantees:
//!
//! - **Monotone**: an unlocked id is never evaluated again and never revoked.
//! - **Idempotent**: evaluating twice with the same snapshot and the updated
//!   map yields zero new unlocks the second time.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::{AchievementDef, StatsSnapshot, UnlockRecord, ACHIEVEMENTS};

/// Outcome of one evaluation pass.
pub struct Evaluation {
    /// Definitions newly crossed this pass, catalog order.
    pub newly_unlocked: Vec<&'static AchievementDef>,
    /// Sum of the new unlocks' XP rewards.
    pub bonus_xp: i64,
}

/// Evaluate every locked definition against `snapshot`, marking unlocks in
/// `unlocked` with `now` as the timestamp.
pub fn evaluate(
    snapshot: &StatsSnapshot,
    unlocked: &mut BTreeMap<String, UnlockRecord>,
    now: NaiveDateTime,
) -> Evaluation {
    let mut newly_unlocked = Vec::new();
    let mut bonus_xp = 0;

    for def in ACHIEVEMENTS {
        let already = unlocked.get(def.id).map(|r| r.unlocked).unwrap_or(false);
        if already {
            continue;
        }
        if (def.condition)(snapshot) {
            unlocked.insert(
                def.id.to_string(),
                UnlockRecord {
                    unlocked: true,
                    unlocked_at: Some(now),
                },
            );
            bonus_xp += def.xp_reward;
            newly_unlocked.push(def);
        }
    }

    Evaluation {
        newly_unlocked,
        bonus_xp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        "2026-08-07T12:00:00".parse().unwrap()
    }

    #[test]
    fn threshold_not_met_stays_locked() {
        let snapshot = StatsSnapshot {
            total_xp_earned: 99,
            ..Default::default()
        };
        let mut map = BTreeMap::new();
        let result = evaluate(&snapshot, &mut map, now());
        assert!(!result.newly_unlocked.iter().any(|d| d.id == "first_100_xp"));
        assert!(!map.contains_key("first_100_xp"));
    }

    #[test]
    fn unlock_fires_exactly_once_with_bonus() {
        let snapshot = StatsSnapshot {
            total_xp_earned: 100,
            ..Default::default()
        };
        let mut map = BTreeMap::new();

        let first = evaluate(&snapshot, &mut map, now());
        assert!(first.newly_unlocked.iter().any(|d| d.id == "first_100_xp"));
        let bonus = first.bonus_xp;
        assert!(bonus >= 25);
        assert!(map["first_100_xp"].unlocked);
        assert_eq!(map["first_100_xp"].unlocked_at, Some(now()));

        // Second pass with the updated map: nothing new, no double bonus.
        let second = evaluate(&snapshot, &mut map, now());
        assert!(second.newly_unlocked.is_empty());
        assert_eq!(second.bonus_xp, 0);
    }

    #[test]
    fn never_revokes() {
        let mut map = BTreeMap::new();
        map.insert(
            "streak_30".to_string(),
            UnlockRecord {
                unlocked: true,
                unlocked_at: Some(now()),
            },
        );
        // Snapshot that no longer satisfies the condition.
        let snapshot = StatsSnapshot::default();
        evaluate(&snapshot, &mut map, now());
        assert!(map["streak_30"].unlocked);
    }

    #[test]
    fn multiple_unlocks_in_one_pass_accumulate_bonus() {
        let snapshot = StatsSnapshot {
            total_xp_earned: 1_500,
            total_minutes_tracked: 200,
            ..Default::default()
        };
        let mut map = BTreeMap::new();
        let result = evaluate(&snapshot, &mut map, now());
        // first_tick, first_100_xp, xp_1k at minimum.
        assert!(result.newly_unlocked.len() >= 3);
        let expected: i64 = result.newly_unlocked.iter().map(|d| d.xp_reward).sum();
        assert_eq!(result.bonus_xp, expected);
    }

    #[test]
    fn meta_achievement_counts_unlocked() {
        let snapshot = StatsSnapshot {
            achievements_unlocked: 15,
            ..Default::default()
        };
        let mut map = BTreeMap::new();
        let result = evaluate(&snapshot, &mut map, now());
        assert!(result.newly_unlocked.iter().any(|d| d.id == "completionist"));
    }
}
