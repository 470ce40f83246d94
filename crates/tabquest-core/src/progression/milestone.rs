//! Lifetime-XP milestones.
//!
//! A fixed ascending list of lifetime-XP thresholds with cosmetic labels.
//! Because `total_xp_earned` is monotone, each threshold is crossed at most
//! once; the tick engine reports crossings over the (old, new] interval.

/// One milestone threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub threshold: u64,
    pub label: &'static str,
}

/// Milestones in ascending threshold order.
pub static MILESTONES: &[Milestone] = &[
    Milestone { threshold: 100, label: "Getting Started" },
    Milestone { threshold: 500, label: "Warming Up" },
    Milestone { threshold: 1_000, label: "Committed" },
    Milestone { threshold: 5_000, label: "Dedicated" },
    Milestone { threshold: 10_000, label: "Powerhouse" },
    Milestone { threshold: 25_000, label: "Unstoppable" },
    Milestone { threshold: 50_000, label: "Legendary" },
    Milestone { threshold: 100_000, label: "Transcendent" },
];

/// Milestones whose threshold lies in `(old_total, new_total]`.
pub fn crossed_milestones(old_total: u64, new_total: u64) -> Vec<&'static Milestone> {
    MILESTONES
        .iter()
        .filter(|m| m.threshold > old_total && m.threshold <= new_total)
        .collect()
}

/// The next milestone not yet reached, if any.
pub fn next_milestone(total: u64) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| m.threshold > total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ascending() {
        for pair in MILESTONES.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }

    #[test]
    fn crossing_detects_single_threshold() {
        let crossed = crossed_milestones(90, 110);
        assert_eq!(crossed.len(), 1);
        assert_eq!(crossed[0].label, "Getting Started");
    }

    #[test]
    fn crossing_is_inclusive_at_new_total() {
        assert_eq!(crossed_milestones(99, 100).len(), 1);
        assert!(crossed_milestones(100, 100).is_empty());
    }

    #[test]
    fn large_jump_reports_every_crossed_threshold() {
        let crossed = crossed_milestones(0, 1_000);
        assert_eq!(crossed.len(), 3);
    }

    #[test]
    fn next_milestone_lookup() {
        assert_eq!(next_milestone(0).unwrap().threshold, 100);
        assert_eq!(next_milestone(100).unwrap().threshold, 500);
        assert!(next_milestone(100_000).is_none());
    }
}
