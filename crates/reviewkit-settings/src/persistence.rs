//! Settings Persistence
//!
//! Loads the configuration at startup and writes it back on change. A
//! missing file is not an error: the defaults are used and the file is
//! created on the first save.

use crate::config::Config;
use reviewkit_core::Result;
use std::path::{Path, PathBuf};

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Bind to a file path with default settings in memory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            path: path.into(),
        }
    }

    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::new(path));
        }
        let config = Config::load_from_file(&path)?;
        Ok(Self { config, path })
    }

    /// Save settings to the bound file
    pub fn save(&self) -> Result<()> {
        self.config.save_to_file(&self.path)
    }

    /// The bound file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the config after validating it
    pub fn update(&mut self, config: Config) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
