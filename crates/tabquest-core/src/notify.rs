//! Notification dedup and display ordering.
//!
//! A short rolling history of emitted notification kinds suppresses repeats
//! of the same kind inside a cooldown window, so a long distracting stretch
//! nags once, not every minute. `Critical` notifications always pass.
//!
//! Delivery is fire-and-forget: the consumer renders and auto-dismisses, and
//! a failed delivery never feeds back into the core.

use std::collections::VecDeque;

use chrono::NaiveDateTime;

use crate::events::{Event, NotificationPayload, Priority};
use crate::storage::Settings;

/// Cooldown between two notifications of the same kind.
pub const DEDUP_COOLDOWN_SECS: i64 = 300;

/// Emitted-notification history entries kept.
const HISTORY_MAX: usize = 64;

/// Rolling dedup state, owned by the tracker. Not persisted: a process
/// restart forgetting recent toasts is harmless.
#[derive(Debug, Default)]
pub struct NotificationDedup {
    history: VecDeque<(&'static str, NaiveDateTime)>,
}

impl NotificationDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert tick events into renderable payloads, applying the user's
    /// notification settings and the per-kind cooldown. Emission order is
    /// preserved.
    pub fn filter(
        &mut self,
        events: &[Event],
        settings: &Settings,
        now: NaiveDateTime,
    ) -> Vec<NotificationPayload> {
        if !settings.show_notifications {
            return Vec::new();
        }
        let mut out = Vec::new();
        for event in events {
            if !allowed_by_settings(event, settings) {
                continue;
            }
            let payload = event.to_notification();
            if payload.priority < Priority::Critical && self.suppressed(payload.kind, now) {
                continue;
            }
            self.record(payload.kind, now);
            out.push(payload);
        }
        out
    }

    fn suppressed(&self, kind: &str, now: NaiveDateTime) -> bool {
        self.history.iter().any(|(k, at)| {
            *k == kind && (now - *at).num_seconds() < DEDUP_COOLDOWN_SECS
        })
    }

    fn record(&mut self, kind: &'static str, now: NaiveDateTime) {
        self.history.push_back((kind, now));
        while self.history.len() > HISTORY_MAX {
            self.history.pop_front();
        }
    }
}

fn allowed_by_settings(event: &Event, settings: &Settings) -> bool {
    match event {
        Event::XpGained { .. } | Event::XpLost { .. } => settings.show_xp_toasts,
        Event::DistractionWarning { .. } => settings.show_distraction_warnings,
        _ => true,
    }
}

/// Order payloads for simultaneous display: priority descending, ties keep
/// emission order.
pub fn sort_for_display(payloads: &mut [NotificationPayload]) {
    payloads.sort_by(|a, b| b.priority.cmp(&a.priority));
}
