mod config;
mod store;

pub use config::{Config, JourneyConfig, RemindersConfig, WheelConfig};
pub use store::{JsonFileStore, MemoryStore, StateStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `ELYSIUM_DATA_DIR` overrides the location entirely. Otherwise this is
/// `~/.config/elysium/`, or `~/.config/elysium-dev/` when `ELYSIUM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("ELYSIUM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ELYSIUM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("elysium-dev")
            } else {
                base_dir.join("elysium")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
