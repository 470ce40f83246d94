//! Combo multiplier tiers.
//!
//! Consecutive productive minutes climb through a fixed tier table. A
//! distracting observation resets the counter (multiplier snaps back to 1.0);
//! a neutral observation neither increments nor resets -- neutral is
//! combo-neutral. The reset/increment bookkeeping lives in the tick engine;
//! this module only maps a counter value to its tier.

use serde::Serialize;

/// Result of tier evaluation for a consecutive-minute count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComboTier {
    /// XP multiplier applied to productive base XP.
    pub multiplier: f64,
    /// Display label, `None` below the lowest tier.
    pub label: Option<&'static str>,
}

/// Tier table: (minutes threshold, multiplier, label), highest first.
pub static COMBO_TIERS: &[(u32, f64, &str)] = &[
    (60, 3.0, "Unstoppable"),
    (30, 2.0, "In The Zone"),
    (20, 1.75, "Flow State"),
    (10, 1.5, "Warmed Up"),
];

/// Map consecutive productive minutes to a tier.
///
/// Evaluated from the highest threshold down; the first tier whose threshold
/// is met wins. Below the lowest threshold the multiplier is 1.0 with no
/// label.
pub fn combo_tier(consecutive_productive_minutes: u32) -> ComboTier {
    for &(threshold, multiplier, label) in COMBO_TIERS {
        if consecutive_productive_minutes >= threshold {
            return ComboTier {
                multiplier,
                label: Some(label),
            };
        }
    }
    ComboTier {
        multiplier: 1.0,
        label: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_lowest_tier() {
        assert_eq!(combo_tier(0).multiplier, 1.0);
        assert_eq!(combo_tier(9).multiplier, 1.0);
        assert!(combo_tier(9).label.is_none());
    }

    #[test]
    fn tier_starts_exactly_at_threshold() {
        assert_eq!(combo_tier(10).multiplier, 1.5);
        assert_eq!(combo_tier(10).label, Some("Warmed Up"));
        assert_eq!(combo_tier(19).multiplier, 1.5);
        assert_eq!(combo_tier(20).multiplier, 1.75);
        assert_eq!(combo_tier(30).multiplier, 2.0);
        assert_eq!(combo_tier(60).multiplier, 3.0);
        assert_eq!(combo_tier(600).multiplier, 3.0);
    }

    #[test]
    fn multipliers_monotone_in_minutes() {
        let mut prev = 0.0;
        for m in 0..=120 {
            let tier = combo_tier(m);
            assert!(
                tier.multiplier >= prev,
                "multiplier dropped at {m} minutes"
            );
            prev = tier.multiplier;
        }
    }

    #[test]
    fn table_is_sorted_highest_first() {
        for pair in COMBO_TIERS.windows(2) {
            assert!(pair[0].0 > pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
    }
}
