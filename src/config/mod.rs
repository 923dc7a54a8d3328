mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            retry: RetryConfig::default(),
            generate: GenerateConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config, falling back to defaults when the file does not exist.
    /// An explicitly requested file must exist.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        if !explicit && !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.server.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base.clone()));
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }

        if self.generate.hour_caps.is_empty() {
            return Err(ConfigError::NoHourCaps);
        }
        if let Some(&cap) = self.generate.hour_caps.iter().find(|&&c| c == 0) {
            return Err(ConfigError::InvalidHourCap(cap));
        }
        if !self.generate.hour_caps.contains(&self.generate.max_hours) {
            return Err(ConfigError::MaxHoursNotOffered(self.generate.max_hours));
        }

        Ok(())
    }
}
