//! Progression math: XP, combos, levels, streaks, milestones.
//!
//! Everything here is a pure function of its inputs. The tick engine feeds
//! these from the persisted aggregate and the observation context; nothing in
//! this module touches storage or the clock.

mod combo;
mod level;
mod milestone;
mod streak;
mod xp;

pub use combo::{combo_tier, ComboTier, COMBO_TIERS};
pub use level::{
    level_from_xp, prestige_tier, progress_percent, rank_title, xp_for_level,
};
pub use milestone::{crossed_milestones, next_milestone, Milestone, MILESTONES};
pub use streak::{Streak, StreakChange};
pub use xp::{
    calculate_tick_xp, is_early_bird_hour, is_night_owl_hour, XpBreakdown, XpComponent,
    TICK_XP_CAP, XP_RATE_DISTRACTING, XP_RATE_NEUTRAL, XP_RATE_PRODUCTIVE,
};
