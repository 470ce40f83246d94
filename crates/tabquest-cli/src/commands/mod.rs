pub mod achievements;
pub mod config;
pub mod data;
pub mod stats;
pub mod tick;

use tabquest_core::{Settings, SqliteStore, Tracker};

/// Open the default on-disk tracker.
pub fn open_tracker() -> Result<Tracker<SqliteStore>, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let settings = Settings::load_or_default();
    Ok(Tracker::new(store, settings))
}
