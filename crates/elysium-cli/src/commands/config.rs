use clap::Subcommand;
use elysium_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dot-path key: journey.state_file, journey.catalog_path,
        /// reminders.enabled_by_default, reminders.hour or wheel.seed
        key: String,
    },
    /// Change one setting and write config.toml
    Set {
        /// Dot-path key, as for `get`
        key: String,
        /// New value; `reminders.hour` takes 0-23
        value: String,
    },
    /// Print the whole configuration as JSON
    List,
    /// Restore the default state file, catalog, reminder and wheel settings
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            tracing::debug!(%key, %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let config = Config::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("configuration restored to defaults");
        }
    }
    Ok(())
}
