//! # Elysium Core Library
//!
//! Journey progression for the Elysium daily fortune wheel: a 25-day
//! sequence of spins, each unlocking a museum visit or a reason, gathered
//! into a Memory Vault. The CLI binary drives every operation; any other
//! front end is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Journey**: the persisted [`UserState`], the daily spin gate and pure
//!   state transitions. Callers run load, mutate, save, render.
//! - **Vault**: read-only 25-slot projection of the spin history
//! - **Wheel**: outcome selection from the [`Catalog`]
//! - **Storage**: JSON state store and TOML configuration
//!
//! ## Key Components
//!
//! - [`UserState`]: state value and its transitions
//! - [`StateStore`]: load/save abstraction over the persisted JSON
//! - [`VaultGrid`]: the Memory Vault view
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod error;
pub mod journey;
pub mod reminder;
pub mod storage;
pub mod vault;
pub mod visits;
pub mod wheel;

pub use catalog::{Catalog, Prize, Reason};
pub use error::{ConfigError, CoreError, IntegrityError, StorageError, ValidationError};
pub use journey::{
    Mutation, OutcomeKind, RejectReason, SpinEntry, UserState, BOOTSTRAP_SPINS, VAULT_CAPACITY,
};
pub use reminder::ReminderPayload;
pub use storage::{Config, JsonFileStore, MemoryStore, StateStore};
pub use vault::{VaultGrid, VaultItem, VaultSlot};
pub use visits::{upcoming_visits, ScheduledVisit};
pub use wheel::{WheelKind, WheelSpin};
