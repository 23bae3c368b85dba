//! Activation and deactivation through the replication collaborator.

use crate::actions::traits::ItemAction;
use crate::collaborators::{ReplicationActionType, ReplicationOptions, Replicator};
use crate::constants::labels::{ACTIVATE, DEACTIVATE};
use crate::error::ActionResult;
use crate::logging::item_span;
use crate::round_robin::{RoundRobin, SharedCursor};
use crate::session::RepositorySession;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, Instrument};

/// Which replication options each invocation uses
#[derive(Debug)]
pub enum TargetSelection {
    /// The platform's default agents
    Default,
    /// The same options for every item
    Fixed(ReplicationOptions),
    /// The next options in rotation, one draw per item
    RoundRobin(SharedCursor<ReplicationOptions>),
}

impl TargetSelection {
    pub fn round_robin(options: Vec<ReplicationOptions>) -> ActionResult<Self> {
        Ok(TargetSelection::RoundRobin(RoundRobin::new(options)?.shared()))
    }
}

/// Replicates each item with a fixed action type
pub struct Replicate {
    replicator: Arc<dyn Replicator>,
    action_type: ReplicationActionType,
    targets: TargetSelection,
}

impl Replicate {
    pub fn new(
        replicator: Arc<dyn Replicator>,
        action_type: ReplicationActionType,
        targets: TargetSelection,
    ) -> Self {
        Self {
            replicator,
            action_type,
            targets,
        }
    }

    pub fn action_type(&self) -> ReplicationActionType {
        self.action_type
    }

    async fn replicate(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        let drawn;
        let options = match &self.targets {
            TargetSelection::Default => None,
            TargetSelection::Fixed(options) => Some(options),
            TargetSelection::RoundRobin(cursor) => {
                drawn = cursor.advance();
                Some(&drawn)
            }
        };

        self.replicator
            .replicate(session, self.action_type, path, options)
            .await?;

        debug!(
            path = %path,
            action = %self.action_type,
            agents = ?options.map(|o| &o.agent_ids),
            "Replicated item"
        );
        Ok(())
    }

    fn label(&self) -> &'static str {
        match self.action_type {
            ReplicationActionType::Activate => ACTIVATE,
            ReplicationActionType::Deactivate => DEACTIVATE,
        }
    }
}

#[async_trait]
impl ItemAction for Replicate {
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        self.replicate(session, path)
            .instrument(item_span(self.label(), path))
            .await
    }

    fn action_name(&self) -> &'static str {
        self.label()
    }
}
