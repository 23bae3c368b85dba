//! Replication transport.

use crate::error::ActionResult;
use crate::session::RepositorySession;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplicationActionType {
    Activate,
    Deactivate,
}

impl std::fmt::Display for ReplicationActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplicationActionType::Activate => write!(f, "activate"),
            ReplicationActionType::Deactivate => write!(f, "deactivate"),
        }
    }
}

/// Where and how a replication request is delivered.
///
/// For large batch publishing, `synchronous` should be set so each request
/// completes before the worker moves on to the next item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplicationOptions {
    pub synchronous: bool,
    /// Agent ids to deliver to; empty means every enabled agent
    pub agent_ids: Vec<String>,
    pub suppress_versions: bool,
    pub suppress_status_update: bool,
}

impl ReplicationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a single agent
    pub fn for_agent(agent_id: impl Into<String>) -> Self {
        Self {
            agent_ids: vec![agent_id.into()],
            ..Self::default()
        }
    }

    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    pub fn suppress_versions(mut self, suppress: bool) -> Self {
        self.suppress_versions = suppress;
        self
    }

    pub fn suppress_status_update(mut self, suppress: bool) -> Self {
        self.suppress_status_update = suppress;
        self
    }
}

/// Publishes or withdraws repository content
#[async_trait]
pub trait Replicator: Send + Sync {
    /// Replicate `path`; `None` options means the platform's default agents
    async fn replicate(
        &self,
        session: &mut dyn RepositorySession,
        action: ReplicationActionType,
        path: &str,
        options: Option<&ReplicationOptions>,
    ) -> ActionResult<()>;
}
