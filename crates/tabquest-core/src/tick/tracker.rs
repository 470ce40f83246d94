//! The tracker: single owner of the read-modify-write cycle.
//!
//! Exactly one tick is in flight at a time -- the scheduler is external and
//! durable (the host re-fires it every minute regardless of process
//! restarts), and both the tick path and the tab-switch path go through
//! `&mut self` here, so writes to the aggregate fully serialize.
//!
//! A persistence failure propagates to the caller with no partial state
//! applied; notification filtering happens after the write and can never
//! roll it back.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::Result;
use crate::events::{BadgeSummary, Event, NotificationPayload};
use crate::notify::NotificationDedup;
use crate::snapshot::DashboardSnapshot;
use crate::storage::{Settings, StateStore};

use super::engine::{evaluate_tick, TickContext};
use super::session::sync_session;

/// What one tick produced, for the host to render.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    /// False when preconditions failed and nothing happened.
    pub applied: bool,
    /// The minute's base XP delta (0 when skipped).
    pub xp_delta: i64,
    /// Raw events in emission order.
    pub events: Vec<Event>,
    /// Deduplicated, settings-filtered payloads for the renderer.
    pub notifications: Vec<NotificationPayload>,
    /// Badge projection, absent on a skipped tick.
    pub badge: Option<BadgeSummary>,
}

impl TickReport {
    fn skipped() -> Self {
        Self {
            applied: false,
            xp_delta: 0,
            events: Vec::new(),
            notifications: Vec::new(),
            badge: None,
        }
    }
}

/// Orchestrates ticks against a state store.
pub struct Tracker<S: StateStore> {
    store: S,
    settings: Settings,
    dedup: NotificationDedup,
}

impl<S: StateStore> Tracker<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            store,
            settings,
            dedup: NotificationDedup::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings used for subsequent ticks.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Run one scheduled tick.
    ///
    /// # Errors
    /// Propagates storage failures; on failure no part of the tick's state
    /// is applied.
    pub fn tick(&mut self, ctx: &TickContext) -> Result<TickReport> {
        let state = self.store.load()?;
        let Some(outcome) = evaluate_tick(ctx, &state, &self.settings) else {
            log::debug!("tick skipped at {}: preconditions not met", ctx.now);
            return Ok(TickReport::skipped());
        };

        // The single point of mutation. Fails atomically.
        self.store.save(&outcome.state)?;

        let notifications = self.dedup.filter(&outcome.events, &self.settings, ctx.now);
        log::debug!(
            "tick applied at {}: {:+} XP, {} events, {} notifications",
            ctx.now,
            outcome.xp_delta,
            outcome.events.len(),
            notifications.len()
        );
        Ok(TickReport {
            applied: true,
            xp_delta: outcome.xp_delta,
            events: outcome.events,
            notifications,
            badge: Some(outcome.badge),
        })
    }

    /// Handle a tab/window switch: finalize the previous session and open
    /// one on the new domain. No time accrues here; serialized with ticks
    /// through `&mut self`.
    pub fn context_change(&mut self, url: Option<&str>, now: NaiveDateTime) -> Result<()> {
        let mut state = self.store.load()?;
        let domain = url.and_then(crate::classify::extract_domain);
        let category = match &domain {
            Some(host) => {
                crate::classify::classify_domain(host, &self.settings.custom_categories)
            }
            None => crate::classify::Category::Neutral,
        };
        sync_session(&mut state, domain.as_deref(), category, now);
        self.store.save(&state)?;
        Ok(())
    }

    /// Read-only dashboard projection of the current state.
    pub fn snapshot(&self) -> Result<DashboardSnapshot> {
        let state = self.store.load()?;
        Ok(DashboardSnapshot::project(&state))
    }

    /// Serialize the full aggregate for user-initiated backup.
    pub fn export(&self) -> Result<String> {
        let state = self.store.load()?;
        Ok(serde_json::to_string_pretty(&state)?)
    }

    /// Clear all persisted state back to defaults.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        log::info!("progression state reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::new(MemoryStore::new(), Settings::default())
    }

    fn ctx(url: &str, time: &str) -> TickContext {
        TickContext {
            url: Some(url.to_string()),
            user_active: true,
            now: time.parse().unwrap(),
        }
    }

    #[test]
    fn tick_persists_new_state() {
        let mut t = tracker();
        let report = t
            .tick(&ctx("https://github.com/", "2026-08-07T12:00:00"))
            .unwrap();
        assert!(report.applied);
        assert_eq!(report.xp_delta, 10);
        let snap = t.snapshot().unwrap();
        assert_eq!(snap.total_minutes_tracked, 1);
    }

    #[test]
    fn skipped_tick_leaves_state_alone() {
        let mut t = tracker();
        t.tick(&ctx("https://github.com/", "2026-08-07T12:00:00"))
            .unwrap();
        let before = t.export().unwrap();
        let report = t
            .tick(&TickContext {
                url: None,
                user_active: true,
                now: "2026-08-07T12:01:00".parse().unwrap(),
            })
            .unwrap();
        assert!(!report.applied);
        assert_eq!(t.export().unwrap(), before);
    }

    #[test]
    fn persistence_failure_propagates_without_partial_state() {
        let mut t = tracker();
        t.tick(&ctx("https://github.com/", "2026-08-07T12:00:00"))
            .unwrap();
        let before = t.export().unwrap();
        t.store
            .fail_saves
            .store(true, std::sync::atomic::Ordering::Relaxed);
        let result = t.tick(&ctx("https://github.com/", "2026-08-07T12:01:00"));
        assert!(result.is_err());
        t.store
            .fail_saves
            .store(false, std::sync::atomic::Ordering::Relaxed);
        assert_eq!(t.export().unwrap(), before);
    }

    #[test]
    fn context_change_rotates_sessions() {
        let mut t = tracker();
        t.tick(&ctx("https://github.com/", "2026-08-07T12:00:00"))
            .unwrap();
        t.tick(&ctx("https://github.com/", "2026-08-07T12:01:00"))
            .unwrap();
        t.context_change(Some("https://reddit.com/"), "2026-08-07T12:01:30".parse().unwrap())
            .unwrap();
        let state = t.store.load().unwrap();
        assert_eq!(state.current_session.as_ref().unwrap().domain, "reddit.com");
        assert_eq!(state.recent_sessions.len(), 1);
        assert_eq!(state.recent_sessions[0].domain, "github.com");
    }

    #[test]
    fn xp_toast_deduped_across_consecutive_ticks() {
        let mut t = tracker();
        let first = t
            .tick(&ctx("https://github.com/", "2026-08-07T12:00:00"))
            .unwrap();
        assert!(first.notifications.iter().any(|n| n.kind == "xp_gained"));
        let second = t
            .tick(&ctx("https://github.com/", "2026-08-07T12:01:00"))
            .unwrap();
        // Within the cooldown window the repeat toast is suppressed, but the
        // raw event is still reported.
        assert!(!second.notifications.iter().any(|n| n.kind == "xp_gained"));
        assert!(second
            .events
            .iter()
            .any(|e| matches!(e, Event::XpGained { .. })));
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut t = tracker();
        t.tick(&ctx("https://github.com/", "2026-08-07T12:00:00"))
            .unwrap();
        t.reset().unwrap();
        let snap = t.snapshot().unwrap();
        assert_eq!(snap.total_minutes_tracked, 0);
        assert_eq!(snap.level, 1);
    }
}
