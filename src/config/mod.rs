// src/config/mod.rs
mod schema;

use std::path::{Path, PathBuf};
use config::{Config as ConfigLoader, FileFormat};
use tracing::{info, warn};

pub use schema::{Config, ExecutorSettings};

use crate::error::{FanJoinResult, FanJoinError};

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Centralized configuration handling
impl Config {
    /// Load configuration, layering built-in defaults, a user file and `FANJOIN_` env vars
    pub fn load(config_path: Option<&Path>) -> FanJoinResult<Self> {
        info!("Loading configuration");

        let mut config_builder = ConfigLoader::builder();

        // Default configuration
        config_builder = config_builder.add_source(
            config::File::from_str(DEFAULT_CONFIG, FileFormat::Toml)
        );

        // User-provided configuration
        if let Some(path) = config_path {
            if path.exists() {
                config_builder = config_builder.add_source(config::File::from(path));
                info!("Loading user configuration from: {}", path.display());
            } else {
                warn!("Specified configuration file not found: {}", path.display());
            }
        } else {
            let default_path = Self::get_default_config_path();
            if default_path.exists() {
                config_builder = config_builder.add_source(config::File::from(default_path.as_path()));
                info!("Loading default configuration from: {}", default_path.display());
            }
        }

        // FANJOIN_EXECUTOR__TIME_UNIT_MS=10 and friends
        config_builder = config_builder.add_source(
            config::Environment::with_prefix("FANJOIN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
        );

        let config: Config = match config_builder.build() {
            Ok(c) => match c.try_deserialize() {
                Ok(config) => config,
                Err(e) => return Err(FanJoinError::ConfigError(format!("Failed to parse configuration: {}", e))),
            },
            Err(e) => return Err(FanJoinError::ConfigError(format!("Failed to build configuration: {}", e))),
        };

        Ok(config)
    }

    /// Get the default configuration path
    pub fn get_default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fanjoin/config.toml")
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> FanJoinResult<()> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| FanJoinError::SerializationError(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FanJoinError::FileError {
                    path: parent.to_path_buf(),
                    message: format!("Failed to create directory: {}", e),
                })?;
        }

        std::fs::write(path, config_str)
            .map_err(|e| FanJoinError::FileError {
                path: path.to_path_buf(),
                message: format!("Failed to write configuration: {}", e),
            })?;

        info!("Configuration saved to {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/fanjoin.toml"))).unwrap();

        assert_eq!(config.executor, ExecutorSettings::default());
        assert_eq!(config.executor.time_unit().as_millis(), 1000);
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[executor]\ntime_unit_ms = 5\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.executor.time_unit_ms, 5);
        assert_eq!(config.executor.simulated_latency_ms, 1000);
        assert_eq!(config.executor.max_tree_depth, 512);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.executor.max_tree_depth = 16;
        config.save(&path).unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded.executor.max_tree_depth, 16);
    }
}
