//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over a single JSON document.
//!
//! - Missing file: defaults, nothing written.
//! - Loaded values are validated; an out-of-range file is rejected.
//! - Saves validate first and replace the file via a sibling temp file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::ConfigPort;
use crate::config::MonitorConfig;
use crate::error::ConfigError;

pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "JsonFileConfig: {} not found, using defaults",
                    self.path.display()
                );
                return Ok(MonitorConfig::default());
            }
            Err(e) => return Err(ConfigError::IoError(e.to_string())),
        };

        let cfg: MonitorConfig =
            serde_json::from_str(&text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        cfg.validate()?;
        info!("JsonFileConfig: loaded {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let text = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| ConfigError::IoError(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        info!("JsonFileConfig: saved {}", self.path.display());
        Ok(())
    }
}

/// Load the stored config, apply a backend URL override, and validate the
/// result.  With `persist` set, the effective config is written back.
pub fn resolve(
    store: &impl ConfigPort,
    backend_url: Option<String>,
    persist: bool,
) -> Result<MonitorConfig, ConfigError> {
    let mut config = store.load()?;
    if let Some(url) = backend_url {
        config.backend_url = url;
        config.validate()?;
    }
    if persist {
        store.save(&config)?;
    }
    Ok(config)
}
