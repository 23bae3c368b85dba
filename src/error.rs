//! Error types for deferred actions.
//!

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Session error: {0}")]
    Session(String),
    #[error("Asset error: {0}")]
    Asset(String),
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
    #[error("Replication error for {path}: {reason}")]
    Replication { path: String, reason: String },
    #[error("Workflow error for {path}: {reason}")]
    Workflow { path: String, reason: String },
    #[error("Retry interrupted after {attempts} attempt(s)")]
    Interrupted { attempts: u32 },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ActionError {
    /// Short machine-friendly code used in structured log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Session(_) => "SESSION_ERROR",
            ActionError::Asset(_) => "ASSET_ERROR",
            ActionError::AssetNotFound(_) => "ASSET_NOT_FOUND",
            ActionError::Replication { .. } => "REPLICATION_ERROR",
            ActionError::Workflow { .. } => "WORKFLOW_ERROR",
            ActionError::Interrupted { .. } => "RETRY_INTERRUPTED",
            ActionError::Validation(_) => "VALIDATION_ERROR",
            ActionError::Configuration(_) => "CONFIGURATION_ERROR",
            ActionError::Other(_) => "ACTION_FAILED",
        }
    }
}

impl From<config::ConfigError> for ActionError {
    fn from(error: config::ConfigError) -> Self {
        ActionError::Configuration(error.to_string())
    }
}

impl From<regex::Error> for ActionError {
    fn from(error: regex::Error) -> Self {
        ActionError::Validation(format!("Invalid path pattern: {error}"))
    }
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let error = ActionError::Replication {
            path: "/content/dam/a.jpg".to_string(),
            reason: "agent offline".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Replication error for /content/dam/a.jpg: agent offline"
        );
        assert_eq!(error.error_code(), "REPLICATION_ERROR");
    }

    #[test]
    fn test_anyhow_errors_are_transparent() {
        let error: ActionError = anyhow::anyhow!("commit conflict").into();
        assert_eq!(error.to_string(), "commit conflict");
        assert_eq!(error.error_code(), "ACTION_FAILED");
    }

    #[test]
    fn test_regex_errors_become_validation_errors() {
        let error: ActionError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(error, ActionError::Validation(_)));
    }
}
