//! Synthetic workflow execution.

use crate::actions::traits::ItemAction;
use crate::collaborators::{WorkflowModel, WorkflowRunner};
use crate::constants::labels::SYNTHETIC_WORKFLOW;
use crate::constants::markers::CHANGED_BY_WORKFLOW_PROCESS;
use crate::error::ActionResult;
use crate::logging::item_span;
use crate::session::RepositorySession;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, Instrument};

/// Runs a workflow model directly against each item
pub struct StartSyntheticWorkflow {
    runner: Arc<dyn WorkflowRunner>,
    model: WorkflowModel,
}

impl StartSyntheticWorkflow {
    pub fn new(runner: Arc<dyn WorkflowRunner>, model: WorkflowModel) -> Self {
        Self { runner, model }
    }

    pub fn model(&self) -> &WorkflowModel {
        &self.model
    }

    async fn start(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        session.set_user_data(CHANGED_BY_WORKFLOW_PROCESS)?;
        self.runner
            .execute(session, path, &self.model, false, false)
            .await?;
        debug!(path = %path, model = %self.model.id, "Synthetic workflow completed");
        Ok(())
    }
}

#[async_trait]
impl ItemAction for StartSyntheticWorkflow {
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        self.start(session, path)
            .instrument(item_span(SYNTHETIC_WORKFLOW, path))
            .await
    }

    fn action_name(&self) -> &'static str {
        SYNTHETIC_WORKFLOW
    }
}
