//! Hourly activity heatmap.
//!
//! 24 fixed slots keyed by local wall-clock hour, each accumulating today's
//! per-category XP. Reset at day-roll. Hours are local-timezone values with
//! no DST/timezone-change handling; a clock shift smears one day's slots and
//! nothing more.

use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// Per-hour XP accumulators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapSlot {
    #[serde(default)]
    pub productive_xp: i64,
    #[serde(default)]
    pub neutral_xp: i64,
    #[serde(default)]
    pub distracting_xp: i64,
}

/// The current day's 24-slot heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyHeatmap {
    pub slots: [HeatmapSlot; 24],
}

impl Default for HourlyHeatmap {
    fn default() -> Self {
        Self {
            slots: [HeatmapSlot::default(); 24],
        }
    }
}

impl HourlyHeatmap {
    /// Accumulate one tick's XP magnitude into the slot for `hour`.
    ///
    /// Out-of-range hours are ignored rather than panicking; the context is
    /// host-supplied input.
    pub fn record(&mut self, hour: u32, category: Category, xp: i64) {
        let Some(slot) = self.slots.get_mut(hour as usize) else {
            return;
        };
        let amount = xp.abs();
        match category {
            Category::Productive => slot.productive_xp += amount,
            Category::Neutral => slot.neutral_xp += amount,
            Category::Distracting => slot.distracting_xp += amount,
        }
    }

    /// Clear every slot (day-roll).
    pub fn reset(&mut self) {
        self.slots = [HeatmapSlot::default(); 24];
    }

    /// The hour with the most productive XP so far today, if any.
    pub fn peak_productive_hour(&self) -> Option<u32> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.productive_xp > 0)
            .max_by_key(|(_, s)| s.productive_xp)
            .map(|(hour, _)| hour as u32)
    }
}
