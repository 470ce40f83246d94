//! Level curve and rank titles.
//!
//! The curve is `xp_for_level(n) = round(100 * n^1.5)` with an explicit floor
//! at level 1: the general formula would give 100 * 1^1.5 = 100 anyway, but
//! level 1 is pinned so the curve below it can never be reached -- level 1 is
//! the default even at 0 XP.

/// Lifetime XP required to *reach* level `n`.
pub fn xp_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 100;
    }
    (100.0 * (level as f64).powf(1.5)).round() as u64
}

/// Largest level whose entry threshold is covered by `total` lifetime XP.
///
/// Level 1 is the floor: 0 XP is still level 1.
pub fn level_from_xp(total: u64) -> u32 {
    let mut level = 1u32;
    while xp_for_level(level + 1) <= total {
        level += 1;
    }
    level
}

/// Percent progress (0-100) from `level` toward `level + 1`.
pub fn progress_percent(total: u64, level: u32) -> u8 {
    let floor = xp_for_level(level) as i64;
    let ceil = xp_for_level(level + 1) as i64;
    let span = ceil - floor;
    if span <= 0 {
        return 100;
    }
    let into = total as i64 - floor;
    let pct = (100.0 * into as f64 / span as f64).round() as i64;
    pct.clamp(0, 100) as u8
}

/// Display title for a level band.
pub fn rank_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Novice",
        5..=9 => "Apprentice",
        10..=14 => "Adept",
        15..=19 => "Specialist",
        20..=29 => "Expert",
        30..=39 => "Master",
        40..=49 => "Grandmaster",
        50..=74 => "Legend",
        75..=99 => "Mythic",
        _ => "Transcendent",
    }
}

/// Prestige tier for the dashboard header.
pub fn prestige_tier(level: u32) -> &'static str {
    match level {
        0..=24 => "None",
        25..=49 => "Bronze",
        50..=74 => "Silver",
        75..=99 => "Gold",
        _ => "Platinum",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_is_pinned() {
        assert_eq!(xp_for_level(1), 100);
        assert_eq!(xp_for_level(0), 100);
    }

    #[test]
    fn curve_values() {
        assert_eq!(xp_for_level(2), 283);
        assert_eq!(xp_for_level(3), 520);
        assert_eq!(xp_for_level(4), 800);
        assert_eq!(xp_for_level(10), 3162);
    }

    #[test]
    fn zero_xp_is_level_one() {
        assert_eq!(level_from_xp(0), 1);
        assert_eq!(level_from_xp(10), 1);
        assert_eq!(level_from_xp(282), 1);
    }

    #[test]
    fn level_boundaries_round_trip() {
        for level in 2..60 {
            let threshold = xp_for_level(level);
            assert_eq!(level_from_xp(threshold), level, "at threshold of {level}");
            assert_eq!(
                level_from_xp(threshold - 1),
                level - 1,
                "one below threshold of {level}"
            );
        }
    }

    #[test]
    fn progress_clamps_below_floor() {
        // 0 XP at level 1: below the level-1 entry threshold of 100.
        assert_eq!(progress_percent(0, 1), 0);
    }

    #[test]
    fn progress_midpoint() {
        // Level 1 spans 100..283.
        assert_eq!(progress_percent(192, 1), 50);
        assert_eq!(progress_percent(283, 1), 100);
    }

    #[test]
    fn titles_cover_bands() {
        assert_eq!(rank_title(1), "Novice");
        assert_eq!(rank_title(12), "Adept");
        assert_eq!(rank_title(100), "Transcendent");
        assert_eq!(prestige_tier(1), "None");
        assert_eq!(prestige_tier(60), "Silver");
        assert_eq!(prestige_tier(120), "Platinum");
    }
}
