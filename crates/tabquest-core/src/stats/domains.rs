//! Lifetime per-domain aggregates.
//!
//! One entry per domain ever observed: visit count, minutes, XP, last
//! category, last seen. Never pruned.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// Lifetime stats for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStats {
    /// Sessions opened on this domain.
    #[serde(default)]
    pub visits: u64,
    /// Ticks accrued on this domain.
    #[serde(default)]
    pub total_minutes: u64,
    /// Net XP earned on this domain (can go negative for distracting ones).
    #[serde(default)]
    pub total_xp: i64,
    /// Category at last observation.
    pub category: Category,
    /// Local time of the last tick or visit.
    pub last_visit: NaiveDateTime,
}

/// Top `n` domains by net XP, descending; ties break on the domain name for
/// deterministic output.
pub fn top_domains(
    stats: &BTreeMap<String, DomainStats>,
    n: usize,
) -> Vec<(String, DomainStats)> {
    let mut entries: Vec<_> = stats
        .iter()
        .map(|(domain, s)| (domain.clone(), s.clone()))
        .collect();
    entries.sort_by(|a, b| b.1.total_xp.cmp(&a.1.total_xp).then(a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}
