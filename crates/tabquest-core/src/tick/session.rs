//! Session bookkeeping.
//!
//! A session spans continuous attention on one domain: opened on tab/window
//! activation, closed on the next switch or focus loss. At most one session
//! is open at a time, owned by the tick/tab-switch path. Completed sessions
//! shorter than [`SESSION_MIN_SECS`] are discarded; the rest land in the
//! bounded recent ring.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::Category;
use crate::state::ProgressionState;
use crate::stats::DomainStats;

/// Minimum duration for a session to be archived.
pub const SESSION_MIN_SECS: u64 = 60;

/// One stretch of attention on a single domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub domain: String,
    pub category: Category,
    pub started_at: NaiveDateTime,
    #[serde(default)]
    pub ended_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default)]
    pub xp_earned: i64,
    #[serde(default)]
    pub ticks: u32,
}

impl Session {
    pub fn open(domain: String, category: Category, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            domain,
            category,
            started_at: now,
            ended_at: None,
            duration_secs: 0,
            xp_earned: 0,
            ticks: 0,
        }
    }
}

/// Close the open session, if any, archiving it when long enough.
///
/// Idempotent and bounded: calling with no open session is a no-op, so the
/// tab-switch handler and the tick path can both call it safely.
pub fn finalize_session(state: &mut ProgressionState, now: NaiveDateTime) {
    let Some(mut session) = state.current_session.take() else {
        return;
    };
    let elapsed = (now - session.started_at).num_seconds().max(0) as u64;
    session.ended_at = Some(now);
    session.duration_secs = elapsed;
    if elapsed >= SESSION_MIN_SECS {
        state.archive_session(session);
    } else {
        log::debug!(
            "discarding short session on {} ({elapsed}s)",
            session.domain
        );
    }
}

/// Open a session on `domain`, counting a visit in the domain stats.
///
/// The caller must have finalized any previous session first.
pub fn open_session(
    state: &mut ProgressionState,
    domain: &str,
    category: Category,
    now: NaiveDateTime,
) {
    debug_assert!(state.current_session.is_none());
    let entry = state
        .domain_stats
        .entry(domain.to_string())
        .or_insert_with(|| DomainStats {
            visits: 0,
            total_minutes: 0,
            total_xp: 0,
            category,
            last_visit: now,
        });
    entry.visits += 1;
    entry.category = category;
    entry.last_visit = now;
    state.current_session = Some(Session::open(domain.to_string(), category, now));
}

/// Make the open session match `domain`, closing/opening as needed.
pub fn sync_session(
    state: &mut ProgressionState,
    domain: Option<&str>,
    category: Category,
    now: NaiveDateTime,
) {
    let matches = state
        .current_session
        .as_ref()
        .is_some_and(|s| Some(s.domain.as_str()) == domain);
    if matches {
        return;
    }
    finalize_session(state, now);
    if let Some(domain) = domain {
        open_session(state, domain, category, now);
    }
}
