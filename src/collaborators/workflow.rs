//! Synthetic workflow runner.

use crate::error::ActionResult;
use crate::session::RepositorySession;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptor of a repository-defined workflow model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowModel {
    /// Model id, usually the model's repository path
    pub id: String,
    pub title: Option<String>,
    /// Extra configuration passed through to the runner untouched
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl WorkflowModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Executes workflow process steps directly against a payload path
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    async fn execute(
        &self,
        session: &mut dyn RepositorySession,
        path: &str,
        model: &WorkflowModel,
        auto_save_after_each_step: bool,
        auto_refresh_before_each_step: bool,
    ) -> ActionResult<()>;
}
