pub mod config;
pub mod record;
pub mod schedule;
pub mod session;
pub mod spin;
pub mod status;
pub mod vault;

use elysium_core::{Catalog, Config, JsonFileStore, StateStore, UserState};

/// Everything a journey command needs: config, catalog, store and state.
pub struct Journey {
    pub config: Config,
    pub catalog: Catalog,
    pub store: JsonFileStore,
    pub state: UserState,
}

impl Journey {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let catalog = config.catalog()?;
        let store = JsonFileStore::new(config.state_path()?);
        let state = if store.path().exists() {
            store.load()
        } else {
            UserState::default().set_notifications(config.reminders.enabled_by_default)
        };
        tracing::debug!(
            path = %store.path().display(),
            spins = state.spin_count(),
            "opened journey"
        );
        Ok(Self {
            config,
            catalog,
            store,
            state,
        })
    }

    pub fn save(&mut self, next: UserState) -> Result<(), Box<dyn std::error::Error>> {
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }
}
