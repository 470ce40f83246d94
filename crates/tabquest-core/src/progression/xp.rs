//! Per-minute XP calculation.
//!
//! One observed minute becomes a signed XP delta built in layers: category
//! base rate, combo multiplier, time-of-day bonus, streak bonus, then a hard
//! cap on the final sum. Every layer's contribution is recorded in the
//! breakdown so the UI can show where the number came from.
//!
//! Penalties are asymmetric: a negative base (distracting) is returned as-is.
//! Bonuses amplify gains, never losses.

use serde::Serialize;

use crate::classify::Category;

/// XP per productive minute.
pub const XP_RATE_PRODUCTIVE: i64 = 10;
/// XP per neutral minute.
pub const XP_RATE_NEUTRAL: i64 = 2;
/// XP per distracting minute (penalty).
pub const XP_RATE_DISTRACTING: i64 = -5;

/// Hard cap on one tick's final positive XP. Applies to the summed result,
/// not the base, so stacked bonuses cannot push past it.
pub const TICK_XP_CAP: i64 = 50;

/// Time-of-day bonus, percent of the post-combo amount.
pub const TIME_OF_DAY_BONUS_PCT: i64 = 10;
/// Streak bonus percent per streak day.
pub const STREAK_BONUS_PCT_PER_DAY: u32 = 1;
/// Streak bonus ceiling, percent.
pub const STREAK_BONUS_PCT_MAX: u32 = 25;

/// Early-morning bonus window, inclusive hour range.
pub const EARLY_BIRD_HOURS: (u32, u32) = (5, 8);

/// True if `hour` (0-23) falls in the early-bird bonus window.
pub fn is_early_bird_hour(hour: u32) -> bool {
    (EARLY_BIRD_HOURS.0..=EARLY_BIRD_HOURS.1).contains(&hour)
}

/// True if `hour` (0-23) falls in the night-owl bonus window (22:00-03:59).
pub fn is_night_owl_hour(hour: u32) -> bool {
    hour >= 22 || hour <= 3
}

/// One labeled contribution to the tick's XP total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XpComponent {
    pub label: &'static str,
    pub amount: i64,
}

/// Tick XP result with its component trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XpBreakdown {
    /// Ordered contributions; amounts sum to `total`.
    pub components: Vec<XpComponent>,
    /// Final signed XP delta for the minute.
    pub total: i64,
}

impl XpBreakdown {
    fn push(&mut self, label: &'static str, amount: i64) {
        if amount != 0 {
            self.components.push(XpComponent { label, amount });
        }
    }
}

fn base_rate(category: Category) -> i64 {
    match category {
        Category::Productive => XP_RATE_PRODUCTIVE,
        Category::Neutral => XP_RATE_NEUTRAL,
        Category::Distracting => XP_RATE_DISTRACTING,
    }
}

/// Compute the signed XP delta for one observed minute.
///
/// `hour` is the local wall-clock hour (0-23) of the tick.
pub fn calculate_tick_xp(
    category: Category,
    combo_multiplier: f64,
    streak_days: u32,
    hour: u32,
) -> XpBreakdown {
    let base = base_rate(category);
    let mut breakdown = XpBreakdown {
        components: Vec::new(),
        total: 0,
    };
    breakdown.components.push(XpComponent {
        label: "base",
        amount: base,
    });

    if base < 0 {
        // Penalties skip every bonus layer.
        breakdown.total = base;
        return breakdown;
    }

    let after_combo = (base as f64 * combo_multiplier).round() as i64;
    breakdown.push("combo", after_combo - base);

    let time_bonus = if is_early_bird_hour(hour) || is_night_owl_hour(hour) {
        (after_combo as f64 * TIME_OF_DAY_BONUS_PCT as f64 / 100.0).round() as i64
    } else {
        0
    };
    if is_early_bird_hour(hour) {
        breakdown.push("early_bird", time_bonus);
    } else {
        breakdown.push("night_owl", time_bonus);
    }

    let streak_pct = (streak_days * STREAK_BONUS_PCT_PER_DAY).min(STREAK_BONUS_PCT_MAX);
    let streak_bonus = (after_combo as f64 * streak_pct as f64 / 100.0).round() as i64;
    breakdown.push("streak", streak_bonus);

    let sum = after_combo + time_bonus + streak_bonus;
    let total = sum.min(TICK_XP_CAP);
    breakdown.push("cap", total - sum);

    breakdown.total = total;
    breakdown
}
