//! CLI subcommands.

pub mod backup;
pub mod batch;
pub mod config;
pub mod extract;
pub mod verify;

use std::path::{Path, PathBuf};

use tracing::debug;

use particulars_core::models::config::ParticularsConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("particulars")
        .join("config.json")
}

/// Load the explicit config file, the user config file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ParticularsConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(ParticularsConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(ParticularsConfig::from_file(&default_path)?)
    } else {
        Ok(ParticularsConfig::default())
    }
}
