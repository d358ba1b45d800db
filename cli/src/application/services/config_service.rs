//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::OrcConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the store cannot load the file.
pub fn load_config(store: &impl ConfigStore) -> Result<OrcConfig> {
    store.load()
}

/// Validate and apply `key = value`, then persist.
///
/// # Errors
///
/// Returns an error if validation fails or the store cannot save.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<OrcConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
