//! # Deferred Actions Configuration
//!
//! Settings for the action catalog, layered by the `config` crate:
//!
//! 1. built-in defaults
//! 2. an optional file (TOML, YAML or JSON, picked by extension)
//! 3. `DEFERRED_ACTIONS_<SECTION>__<KEY>` environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use deferred_actions::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let policy = manager.config().retry.policy()?;
//! println!("retrying up to {} times", policy.max_attempts());
//! # Ok(())
//! # }
//! ```

pub mod loader;

pub use loader::ConfigManager;

use crate::constants::defaults::{RETRY_DELAY_MS, RETRY_MAX_ATTEMPTS};
use crate::error::{ActionError, ActionResult};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeferredActionsConfig {
    /// Default retry budget for wrapped actions
    pub retry: RetryConfig,
}

/// Retry budget applied by the catalog's `*_with_defaults` wrappers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            delay_ms: RETRY_DELAY_MS,
        }
    }
}

impl RetryConfig {
    /// Get the inter-attempt delay as Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn policy(&self) -> ActionResult<RetryPolicy> {
        RetryPolicy::new(self.max_attempts, self.delay())
    }
}

impl DeferredActionsConfig {
    pub fn validate(&self) -> ActionResult<()> {
        if self.retry.max_attempts == 0 {
            return Err(ActionError::Configuration(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DeferredActionsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_attempts_fail_validation() {
        let mut config = DeferredActionsConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ActionError::Configuration(_))
        ));
    }

    #[test]
    fn test_policy_from_config() {
        let config = RetryConfig {
            max_attempts: 7,
            delay_ms: 25,
        };
        let policy = config.policy().unwrap();
        assert_eq!(policy.max_attempts(), 7);
        assert_eq!(policy.delay(), Duration::from_millis(25));
    }
}
