use std::error::Error;
use std::path::Path;

use tracing::info;

use crate::core::config::{path_display, Config, ConfigKey};

/// Store `value` under `key` in the config file at `path`.
pub fn set_config_value(path: &Path, key: &str, value: &str) -> Result<String, Box<dyn Error>> {
    let key: ConfigKey = key.parse()?;
    Config::mutate_at(path, |config| {
        config.set_value(key, value)?;
        Ok(())
    })?;
    info!(%key, path = %path_display(path), "Config value set");
    Ok(format!("Set {key} to: {} ({})", value.trim(), path_display(path)))
}

pub fn unset_config_value(path: &Path, key: &str) -> Result<String, Box<dyn Error>> {
    let key: ConfigKey = key.parse()?;
    Config::mutate_at(path, |config| {
        config.unset_value(key);
        Ok(())
    })?;
    info!(%key, path = %path_display(path), "Config value cleared");
    Ok(format!("Unset {key}"))
}
