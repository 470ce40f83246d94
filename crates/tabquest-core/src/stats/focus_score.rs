//! Daily focus score.
//!
//! A bounded 0-100 composite summarizing the day's productivity balance:
//! productive share earns, distracting share costs, streak and combo context
//! add small capped bonuses. The component values are kept on the result for
//! display.

use serde::{Deserialize, Serialize};

/// Weight of the productive share (score points at 100% productive).
const PRODUCTIVE_WEIGHT: f64 = 60.0;
/// Weight of the distracting share penalty.
const DISTRACTING_WEIGHT: f64 = 15.0;
/// Ceiling on the streak bonus.
const STREAK_BONUS_MAX: f64 = 15.0;
/// Ceiling on the combo bonus.
const COMBO_BONUS_MAX: f64 = 10.0;

/// Computed focus score with its component trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusScore {
    pub score: u8,
    pub base: f64,
    pub penalty: f64,
    pub streak_bonus: f64,
    pub combo_bonus: f64,
}

impl Default for FocusScore {
    fn default() -> Self {
        Self {
            score: 0,
            base: 0.0,
            penalty: 0.0,
            streak_bonus: 0.0,
            combo_bonus: 0.0,
        }
    }
}

/// Letter grade for a focus score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusGrade {
    pub letter: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

impl FocusScore {
    /// Compute today's focus score from the day's category XP totals plus
    /// streak/combo context. Zero activity scores zero.
    pub fn compute(
        productive_xp: i64,
        distracting_xp: i64,
        neutral_xp: i64,
        streak_days: u32,
        combo_multiplier: f64,
    ) -> Self {
        // Shares are computed over absolute accumulated XP per category;
        // the distracting bucket accumulates penalty magnitudes.
        let productive = productive_xp.max(0) as f64;
        let distracting = distracting_xp.max(0) as f64;
        let neutral = neutral_xp.max(0) as f64;
        let total = productive + distracting + neutral;
        if total == 0.0 {
            return Self::default();
        }

        let base = productive / total * PRODUCTIVE_WEIGHT;
        let penalty = distracting / total * DISTRACTING_WEIGHT;
        let streak_bonus = ((1.0 + streak_days as f64).log2() * 5.0).min(STREAK_BONUS_MAX);
        let combo_bonus = ((combo_multiplier - 1.0) * 10.0).min(COMBO_BONUS_MAX);

        let raw = base - penalty + streak_bonus + combo_bonus;
        let score = raw.round().clamp(0.0, 100.0) as u8;
        Self {
            score,
            base,
            penalty,
            streak_bonus,
            combo_bonus,
        }
    }

    pub fn grade(&self) -> FocusGrade {
        grade_for_score(self.score)
    }
}

/// Fixed score-to-grade lookup.
pub fn grade_for_score(score: u8) -> FocusGrade {
    match score {
        90..=u8::MAX => FocusGrade {
            letter: "S",
            label: "Laser Focused",
            color: "#a855f7",
        },
        80..=89 => FocusGrade {
            letter: "A",
            label: "Excellent",
            color: "#22c55e",
        },
        65..=79 => FocusGrade {
            letter: "B",
            label: "Solid",
            color: "#3b82f6",
        },
        45..=64 => FocusGrade {
            letter: "C",
            label: "Average",
            color: "#eab308",
        },
        30..=44 => FocusGrade {
            letter: "D",
            label: "Drifting",
            color: "#f97316",
        },
        _ => FocusGrade {
            letter: "F",
            label: "Distracted",
            color: "#ef4444",
        },
    }
}
