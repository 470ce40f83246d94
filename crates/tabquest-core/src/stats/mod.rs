//! Analytics for the dashboard: focus scoring, hourly heatmap, per-domain
//! aggregates.

mod domains;
mod focus_score;
mod heatmap;

pub use domains::{top_domains, DomainStats};
pub use focus_score::{grade_for_score, FocusGrade, FocusScore};
pub use heatmap::{HeatmapSlot, HourlyHeatmap};
