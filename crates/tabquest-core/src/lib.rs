//! # TabQuest Core Library
//!
//! This library provides the core business logic for TabQuest, a browser
//! productivity gamification layer. It follows a CLI-first philosophy: every
//! operation is available through the standalone CLI binary, with any richer
//! host (badge renderer, dashboard) being a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Tick Engine**: a pure per-minute evaluation function over
//!   `(context, state, settings)`; the caller schedules it externally and
//!   durably (once per minute, surviving process restarts)
//! - **Progression**: XP layering, combo tiers, level curve, streaks,
//!   milestones -- all pure math
//! - **Storage**: SQLite-backed atomic state store and TOML-based settings
//! - **Events**: every crossed threshold becomes a typed event; a dedup
//!   layer turns events into renderable notifications
//!
//! ## Key Components
//!
//! - [`Tracker`]: owns the read-modify-write cycle per tick
//! - [`ProgressionState`]: the single persisted aggregate
//! - [`DashboardSnapshot`]: on-demand read-only projection
//! - [`Settings`]: user configuration, read-only to the engine

pub mod achievements;
pub mod classify;
pub mod error;
pub mod events;
pub mod notify;
pub mod progression;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tick;

pub use classify::{classify, Category};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::{BadgeSummary, Event, NotificationPayload, Priority};
pub use snapshot::DashboardSnapshot;
pub use state::ProgressionState;
pub use storage::{MemoryStore, Settings, SqliteStore, StateStore};
pub use tick::{TickContext, TickReport, Tracker};
