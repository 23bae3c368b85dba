//! # External Collaborators
//!
//! Narrow traits over the systems the actions call into: asset storage, the
//! replication transport, and the synthetic workflow runner. Implementations
//! live in the host platform; this crate only consumes them.
//!
//! All collaborators are `Send + Sync` so a single instance can be shared by
//! every worker task through an `Arc`.

pub mod assets;
pub mod replication;
pub mod workflow;

pub use assets::{names_equal_ignore_case, Asset, AssetStore, Rendition};
pub use replication::{ReplicationActionType, ReplicationOptions, Replicator};
pub use workflow::{WorkflowModel, WorkflowRunner};

use std::sync::Arc;

/// Bundle of collaborator handles injected into the action catalog
#[derive(Clone)]
pub struct Collaborators {
    pub assets: Arc<dyn AssetStore>,
    pub replicator: Arc<dyn Replicator>,
    pub workflow_runner: Arc<dyn WorkflowRunner>,
}

impl Collaborators {
    pub fn new(
        assets: Arc<dyn AssetStore>,
        replicator: Arc<dyn Replicator>,
        workflow_runner: Arc<dyn WorkflowRunner>,
    ) -> Self {
        Self {
            assets,
            replicator,
            workflow_runner,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
