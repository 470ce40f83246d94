//! Persistence: TOML settings and the SQLite-backed state store.

mod config;
mod store;

pub use config::Settings;
pub use store::{MemoryStore, SqliteStore, StateStore};

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Returns `~/.config/tabquest[-dev]/` based on TABQUEST_ENV.
///
/// Set TABQUEST_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TABQUEST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tabquest-dev")
    } else {
        base_dir.join("tabquest")
    };

    std::fs::create_dir_all(&dir).map_err(CoreError::Io)?;
    Ok(dir)
}
