//! Configuration Loader
//!
//! Builds a [`DeferredActionsConfig`] from defaults, an optional file, and the
//! process environment.

use super::DeferredActionsConfig;
use crate::constants::defaults::ENV_PREFIX;
use crate::error::ActionResult;
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Owns the loaded configuration and where it came from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: DeferredActionsConfig,
    source_file: Option<PathBuf>,
}

impl ConfigManager {
    /// Load from defaults and the environment only
    pub fn load() -> ActionResult<Arc<ConfigManager>> {
        Self::load_from_sources(None, true)
    }

    /// Load from defaults, `path`, then the environment
    pub fn load_from_file(path: impl AsRef<Path>) -> ActionResult<Arc<ConfigManager>> {
        Self::load_from_sources(Some(path.as_ref()), true)
    }

    /// Load with explicit sources.
    ///
    /// Passing `include_env = false` is useful for testing without depending on
    /// the global environment.
    pub fn load_from_sources(
        file: Option<&Path>,
        include_env: bool,
    ) -> ActionResult<Arc<ConfigManager>> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&DeferredActionsConfig::default())?);

        if let Some(path) = file {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        if include_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: DeferredActionsConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            max_attempts = config.retry.max_attempts,
            delay_ms = config.retry.delay_ms,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            source_file: file.map(Path::to_path_buf),
        }))
    }

    /// Wrap an already-built configuration
    pub fn from_config(config: DeferredActionsConfig) -> ActionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source_file: None,
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &DeferredActionsConfig {
        &self.config
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Configuration as JSON for debugging output
    pub fn debug_config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionError;
    use std::io::Write;

    fn write_config(extension: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(extension)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let manager = ConfigManager::load_from_sources(None, false).unwrap();
        assert_eq!(manager.config(), &DeferredActionsConfig::default());
        assert!(manager.source_file().is_none());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let file = write_config(".toml", "[retry]\nmax_attempts = 5\n");
        let manager = ConfigManager::load_from_sources(Some(file.path()), false).unwrap();

        assert_eq!(manager.config().retry.max_attempts, 5);
        // Untouched keys keep their defaults.
        assert_eq!(manager.config().retry.delay_ms, 1000);
    }

    #[test]
    fn test_json_file_is_supported() {
        let file = write_config(".json", r#"{"retry": {"max_attempts": 2, "delay_ms": 10}}"#);
        let manager = ConfigManager::load_from_sources(Some(file.path()), false).unwrap();

        assert_eq!(manager.config().retry.max_attempts, 2);
        assert_eq!(manager.config().retry.delay_ms, 10);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_config(".toml", "[retry]\nmax_attempts = 0\n");
        let result = ConfigManager::load_from_sources(Some(file.path()), false);
        assert!(matches!(result, Err(ActionError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result =
            ConfigManager::load_from_sources(Some(Path::new("/nonexistent/deferred.toml")), false);
        assert!(matches!(result, Err(ActionError::Configuration(_))));
    }

    #[test]
    fn test_debug_config_is_json() {
        let manager = ConfigManager::from_config(DeferredActionsConfig::default()).unwrap();
        assert_eq!(manager.debug_config()["retry"]["max_attempts"], 3);
    }
}
