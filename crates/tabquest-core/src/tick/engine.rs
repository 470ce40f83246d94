//! The tick evaluation pipeline.
//!
//! One tick = one observed minute. [`evaluate_tick`] is a pure function of
//! `(context, state, settings)`: it clones the aggregate, applies the full
//! pipeline, and returns the new aggregate plus the events it produced. No
//! I/O, no clock reads -- the context carries the local wall-clock time.
//!
//! Pipeline order (fixed):
//! 1. day roll, 2. classify, 3. combo counters, 4. XP computation,
//! 5. apply XP, 6. daily/session/heatmap/domain counters, 7. time-of-day
//! qualifying dates, 8. focus score, 9. level-ups, 10. live streak
//! qualification, 11. milestones, 12. achievements, then the base XP event.
//!
//! A tick whose preconditions fail (idle user, no URL-bearing tab) is
//! skipped entirely: no time accrues, no counter moves, the session stays
//! open.

use chrono::{NaiveDateTime, Timelike};

use crate::achievements::{self, StatsSnapshot};
use crate::classify::{classify_domain, extract_domain, Category};
use crate::events::{BadgeSummary, Event};
use crate::progression::{
    calculate_tick_xp, combo_tier, crossed_milestones, is_early_bird_hour, is_night_owl_hour,
    level_from_xp, rank_title, StreakChange,
};
use crate::state::ProgressionState;
use crate::stats::FocusScore;
use crate::storage::Settings;

use super::day_roll::roll_if_needed;
use super::session::sync_session;

/// Consecutive distracting minutes before a warning event fires.
pub const DISTRACTION_WARNING_THRESHOLD: u32 = 3;

/// Host-supplied observation for one tick. Global runtime state (active tab,
/// idle flag) arrives here explicitly instead of through ambient globals.
#[derive(Debug, Clone, PartialEq)]
pub struct TickContext {
    /// URL of the active tab, if one is known.
    pub url: Option<String>,
    /// False while the user is idle.
    pub user_active: bool,
    /// Local wall-clock time of the tick. Days and hours derive from this;
    /// timezone changes between ticks are not handled.
    pub now: NaiveDateTime,
}

/// Result of one applied tick.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// The new aggregate, ready to persist.
    pub state: ProgressionState,
    /// Events in emission order (combo/warning, level-ups, streak,
    /// milestones, achievements, base XP last).
    pub events: Vec<Event>,
    /// Badge projection after this tick.
    pub badge: BadgeSummary,
    /// The minute's base XP delta, before achievement bonuses.
    pub xp_delta: i64,
}

/// Evaluate one tick. Returns `None` when preconditions fail (no-op tick).
pub fn evaluate_tick(
    ctx: &TickContext,
    state: &ProgressionState,
    settings: &Settings,
) -> Option<TickOutcome> {
    if !ctx.user_active {
        return None;
    }
    let url = ctx.url.as_deref()?;

    let mut state = state.clone();
    let mut events = Vec::new();
    let today = ctx.now.date();
    let hour = ctx.now.hour();

    // 1. Day boundary first, so every counter below lands in today's bucket.
    roll_if_needed(&mut state, today, settings);

    // 2. Classify the active domain. A URL with no extractable domain still
    // ticks as neutral -- internal pages are expected traffic.
    let domain = extract_domain(url);
    let category = match &domain {
        Some(host) => classify_domain(host, &settings.custom_categories),
        None => Category::Neutral,
    };

    // 3. Combo and distraction counters.
    match category {
        Category::Productive => {
            state.combo.consecutive_distracting_ticks = 0;
            state.combo.consecutive_productive_minutes += 1;
            state.combo.highest_combo = state
                .combo
                .highest_combo
                .max(state.combo.consecutive_productive_minutes);
            let tier = combo_tier(state.combo.consecutive_productive_minutes);
            let entered_new_tier = tier.multiplier > state.combo.current_multiplier;
            state.combo.current_multiplier = tier.multiplier;
            if entered_new_tier {
                if let Some(label) = tier.label {
                    events.push(Event::ComboTierReached {
                        minutes: state.combo.consecutive_productive_minutes,
                        multiplier: tier.multiplier,
                        label: label.to_string(),
                        at: ctx.now,
                    });
                }
            }
        }
        Category::Distracting => {
            state.combo.consecutive_productive_minutes = 0;
            state.combo.current_multiplier = 1.0;
            state.combo.consecutive_distracting_ticks += 1;
            if state.combo.consecutive_distracting_ticks >= DISTRACTION_WARNING_THRESHOLD {
                events.push(Event::DistractionWarning {
                    consecutive_minutes: state.combo.consecutive_distracting_ticks,
                    domain: domain.clone().unwrap_or_default(),
                    at: ctx.now,
                });
            }
        }
        Category::Neutral => {
            // Combo-neutral: the productive counter neither grows nor
            // resets; the distracting run is broken.
            state.combo.consecutive_distracting_ticks = 0;
        }
    }

    // 4. XP for this minute.
    let breakdown = calculate_tick_xp(
        category,
        state.combo.current_multiplier,
        state.streak.current,
        hour,
    );
    let xp_delta = breakdown.total;

    // 5. Apply: display XP floors at zero, gains accrue to the lifetime
    // total.
    let old_total = state.total_xp_earned;
    let old_level = state.level;
    state.apply_xp(xp_delta);

    // 6. Daily bucket, session, heatmap, domain stats.
    state.total_minutes_tracked += 1;
    let magnitude = xp_delta.abs();
    match category {
        Category::Productive => {
            state.daily.productive_xp += magnitude;
            state.daily.productive_minutes += 1;
            if let Some(host) = &domain {
                state.daily.productive_domains.insert(host.clone());
            }
        }
        Category::Neutral => {
            state.daily.neutral_xp += magnitude;
            state.daily.neutral_minutes += 1;
        }
        Category::Distracting => {
            state.daily.distracting_xp += magnitude;
            state.daily.distracting_minutes += 1;
        }
    }
    sync_session(&mut state, domain.as_deref(), category, ctx.now);
    if let Some(session) = state.current_session.as_mut() {
        session.ticks += 1;
        session.xp_earned += xp_delta;
        session.duration_secs = (ctx.now - session.started_at).num_seconds().max(0) as u64;
        session.category = category;
    }
    state.heatmap.record(hour, category, xp_delta);
    if let Some(host) = &domain {
        if let Some(entry) = state.domain_stats.get_mut(host) {
            entry.total_minutes += 1;
            entry.total_xp += xp_delta;
            entry.category = category;
            entry.last_visit = ctx.now;
        }
    }

    // 7. Early-bird / night-owl qualifying dates (distinct days only).
    if category == Category::Productive {
        if is_early_bird_hour(hour) && state.last_early_bird_date != Some(today) {
            state.early_bird_days += 1;
            state.last_early_bird_date = Some(today);
        } else if is_night_owl_hour(hour) && state.last_night_owl_date != Some(today) {
            state.night_owl_days += 1;
            state.last_night_owl_date = Some(today);
        }
    }

    // 8. Focus score.
    let score = FocusScore::compute(
        state.daily.productive_xp,
        state.daily.distracting_xp,
        state.daily.neutral_xp,
        state.streak.current,
        state.combo.current_multiplier,
    );
    state.focus_score = score;
    state.record_focus_sample(score.score);

    // 9. Level resolution: one event per level crossed, intermediate levels
    // included. The level itself never decreases.
    let resolved = level_from_xp(state.total_xp_earned);
    if resolved > old_level {
        for level in (old_level + 1)..=resolved {
            state.record_level_up(level, ctx.now);
            events.push(Event::LevelUp {
                level,
                title: rank_title(level).to_string(),
                at: ctx.now,
            });
        }
        state.level = resolved;
    }

    // 10. Live streak qualification.
    if state.daily.productive_xp >= settings.daily_xp_goal {
        match state.streak.mark_today_qualified(today) {
            StreakChange::Extended(days) => {
                events.push(Event::StreakQualified { days, at: ctx.now });
            }
            StreakChange::Started => {
                events.push(Event::StreakQualified { days: 1, at: ctx.now });
            }
            StreakChange::Reset | StreakChange::NoChange => {}
        }
    }

    // 11. Milestones crossed by this minute's gain.
    for milestone in crossed_milestones(old_total, state.total_xp_earned) {
        events.push(Event::MilestoneReached {
            threshold: milestone.threshold,
            label: milestone.label.to_string(),
            at: ctx.now,
        });
    }

    // 12. Achievements, evaluated over a snapshot of the updated aggregate.
    let snapshot = stats_snapshot(&state);
    let evaluation = achievements::evaluate(&snapshot, &mut state.achievements, ctx.now);
    let total_before_bonus = state.total_xp_earned;
    if evaluation.bonus_xp > 0 {
        state.apply_xp(evaluation.bonus_xp);
    }
    for def in &evaluation.newly_unlocked {
        events.push(Event::AchievementUnlocked {
            id: def.id.to_string(),
            title: def.title.to_string(),
            tier: def.tier,
            xp_reward: def.xp_reward,
            at: ctx.now,
        });
    }
    // A milestone crossed only by bonus XP would otherwise never fire: the
    // next tick's interval starts past it.
    for milestone in crossed_milestones(total_before_bonus, state.total_xp_earned) {
        events.push(Event::MilestoneReached {
            threshold: milestone.threshold,
            label: milestone.label.to_string(),
            at: ctx.now,
        });
    }

    // Base XP event last.
    let display_domain = domain.unwrap_or_else(|| "internal".to_string());
    if xp_delta >= 0 {
        events.push(Event::XpGained {
            amount: xp_delta,
            category,
            domain: display_domain,
            breakdown,
            at: ctx.now,
        });
    } else {
        events.push(Event::XpLost {
            amount: -xp_delta,
            domain: display_domain,
            at: ctx.now,
        });
    }

    let badge = BadgeSummary {
        level: state.level,
        last_category: category,
    };

    Some(TickOutcome {
        state,
        events,
        badge,
        xp_delta,
    })
}

/// Derive the achievement snapshot from the aggregate.
pub fn stats_snapshot(state: &ProgressionState) -> StatsSnapshot {
    StatsSnapshot {
        total_xp_earned: state.total_xp_earned,
        total_minutes_tracked: state.total_minutes_tracked,
        level: state.level,
        current_streak: state.streak.current,
        longest_streak: state.streak.longest,
        today_productive_xp: state.daily.productive_xp,
        today_productive_minutes: state.daily.productive_minutes,
        current_combo_multiplier: state.combo.current_multiplier,
        highest_combo: state.combo.highest_combo,
        focus_score: state.focus_score.score,
        longest_session_secs: state.longest_session_secs,
        unique_productive_domains_today: state.daily.productive_domains.len() as u32,
        early_bird_days: state.early_bird_days,
        night_owl_days: state.night_owl_days,
        perfect_week_days: state.perfect_week_days,
        achievements_unlocked: state
            .achievements
            .values()
            .filter(|r| r.unlocked)
            .count() as u32,
    }
}
