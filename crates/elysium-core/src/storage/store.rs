//! Journey state persistence.
//!
//! A store holds exactly one serialized [`UserState`]. Loading never fails:
//! a missing file, or text that is not a JSON object, yields the default
//! state. A JSON object is merged over the defaults key by key, so one bad
//! field never costs the spin history. Saving replaces the stored value
//! wholesale.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::journey::UserState;

/// Load / save access to the persisted journey.
pub trait StateStore {
    /// Read the stored state, falling back to the default.
    fn load(&self) -> UserState;

    /// Overwrite the stored state.
    ///
    /// # Errors
    /// Returns an error if the state cannot be serialized or written.
    fn save(&self, state: &UserState) -> Result<(), StorageError>;

    /// Load, apply `f`, save, and return the saved state.
    ///
    /// # Errors
    /// Returns an error if saving fails.
    fn update<F>(&self, f: F) -> Result<UserState, StorageError>
    where
        F: FnOnce(&UserState) -> UserState,
        Self: Sized,
    {
        let next = f(&self.load());
        self.save(&next)?;
        Ok(next)
    }
}

/// Parse a stored value, substituting the default on any problem.
fn decode(raw: &str, origin: &str) -> UserState {
    match serde_json::from_str::<UserState>(raw) {
        Ok(state) => {
            if let Err(e) = state.verify_integrity(None) {
                warn!(origin, error = %e, "journey state failed integrity check");
            }
            state
        }
        Err(e) => {
            warn!(origin, error = %e, "malformed journey state, using defaults");
            UserState::default()
        }
    }
}

/// One JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> UserState {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw, &self.path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved journey, starting fresh");
                UserState::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read journey state, using defaults");
                UserState::default()
            }
        }
    }

    fn save(&self, state: &UserState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.tmp_path();
        let write_failed = |source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp, json).map_err(write_failed)?;
        std::fs::rename(&tmp, &self.path).map_err(write_failed)?;
        debug!(path = %self.path.display(), spins = state.spin_count(), "saved journey");
        Ok(())
    }
}

/// In-process store holding the serialized JSON, for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary stored string, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    /// The currently stored JSON, if any.
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> UserState {
        match self.raw.borrow().as_deref() {
            Some(raw) => decode(raw, "memory"),
            None => UserState::default(),
        }
    }

    fn save(&self, state: &UserState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        *self.raw.borrow_mut() = Some(json);
        Ok(())
    }
}
