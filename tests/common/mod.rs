//! In-memory collaborators for integration tests.
//!
//! Every mock records the calls it receives behind a `std::sync::Mutex` so tests
//! can assert on exactly what the actions asked for.

#![allow(dead_code)]

pub mod strategies;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use deferred_actions::{
    ActionError, ActionResult, Asset, AssetStore, Collaborators, DeferredActions, Rendition,
    ReplicationActionType, ReplicationOptions, Replicator, RepositorySession, WorkflowModel,
    WorkflowRunner,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Session that counts rollbacks and remembers its user data
#[derive(Debug, Default)]
pub struct MockSession {
    pub reverts: usize,
    pub refreshes: usize,
    pub user_data: Option<String>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepositorySession for MockSession {
    async fn revert(&mut self) -> ActionResult<()> {
        self.reverts += 1;
        Ok(())
    }

    async fn refresh(&mut self) -> ActionResult<()> {
        self.refreshes += 1;
        Ok(())
    }

    fn set_user_data(&mut self, marker: &str) -> ActionResult<()> {
        self.user_data = Some(marker.to_string());
        Ok(())
    }

    fn user_id(&self) -> &str {
        "batch-user"
    }
}

/// Asset store backed by a map of path to asset
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    assets: Mutex<HashMap<String, Asset>>,
    removed: Mutex<Vec<(String, String)>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, asset: Asset) {
        self.assets
            .lock()
            .unwrap()
            .insert(asset.path.clone(), asset);
    }

    /// Add an asset whose renditions were created `offset` seconds after the base time
    pub fn insert_with_offsets(&self, path: &str, renditions: &[(&str, i64)]) {
        let base = base_time();
        let renditions = renditions
            .iter()
            .map(|(name, offset)| {
                Rendition::new(
                    *name,
                    format!("{path}/jcr:content/renditions/{name}"),
                    base + Duration::seconds(*offset),
                )
            })
            .collect();
        self.insert(Asset::new(path, renditions));
    }

    pub fn get(&self, path: &str) -> Option<Asset> {
        self.assets.lock().unwrap().get(path).cloned()
    }

    /// `(asset_path, rendition_name)` pairs in removal order
    pub fn removed(&self) -> Vec<(String, String)> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn resolve(
        &self,
        _session: &dyn RepositorySession,
        path: &str,
    ) -> ActionResult<Option<Asset>> {
        Ok(self.get(path))
    }

    async fn remove_rendition(
        &self,
        _session: &mut dyn RepositorySession,
        asset_path: &str,
        name: &str,
    ) -> ActionResult<()> {
        {
            let mut assets = self.assets.lock().unwrap();
            let asset = assets
                .get_mut(asset_path)
                .ok_or_else(|| ActionError::AssetNotFound(asset_path.to_string()))?;
            asset.renditions.retain(|r| r.name != name);
        }
        self.removed
            .lock()
            .unwrap()
            .push((asset_path.to_string(), name.to_string()));
        Ok(())
    }
}

/// One recorded replication request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationCall {
    pub action: ReplicationActionType,
    pub path: String,
    pub options: Option<ReplicationOptions>,
}

/// Replicator that records requests and can fail a scripted number of times
#[derive(Debug, Default)]
pub struct RecordingReplicator {
    calls: Mutex<Vec<ReplicationCall>>,
    failures: Mutex<VecDeque<String>>,
}

impl RecordingReplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` requests with a replication error
    pub fn fail_next(&self, count: usize) {
        let mut failures = self.failures.lock().unwrap();
        for n in 1..=count {
            failures.push_back(format!("agent unavailable #{n}"));
        }
    }

    pub fn calls(&self) -> Vec<ReplicationCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Replicator for RecordingReplicator {
    async fn replicate(
        &self,
        _session: &mut dyn RepositorySession,
        action: ReplicationActionType,
        path: &str,
        options: Option<&ReplicationOptions>,
    ) -> ActionResult<()> {
        self.calls.lock().unwrap().push(ReplicationCall {
            action,
            path: path.to_string(),
            options: options.cloned(),
        });
        let failure = self.failures.lock().unwrap().pop_front();
        match failure {
            Some(reason) => Err(ActionError::Replication {
                path: path.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// One recorded workflow execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCall {
    pub path: String,
    pub model_id: String,
    pub auto_save_after_each_step: bool,
    pub auto_refresh_before_each_step: bool,
}

#[derive(Debug, Default)]
pub struct RecordingWorkflowRunner {
    calls: Mutex<Vec<WorkflowCall>>,
}

impl RecordingWorkflowRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<WorkflowCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowRunner for RecordingWorkflowRunner {
    async fn execute(
        &self,
        _session: &mut dyn RepositorySession,
        path: &str,
        model: &WorkflowModel,
        auto_save_after_each_step: bool,
        auto_refresh_before_each_step: bool,
    ) -> ActionResult<()> {
        self.calls.lock().unwrap().push(WorkflowCall {
            path: path.to_string(),
            model_id: model.id.clone(),
            auto_save_after_each_step,
            auto_refresh_before_each_step,
        });
        Ok(())
    }
}

/// A catalog wired to fresh mocks, with handles kept for assertions
pub struct TestHarness {
    pub assets: Arc<InMemoryAssetStore>,
    pub replicator: Arc<RecordingReplicator>,
    pub workflows: Arc<RecordingWorkflowRunner>,
    pub actions: DeferredActions,
}

impl TestHarness {
    pub fn new() -> Self {
        let assets = Arc::new(InMemoryAssetStore::new());
        let replicator = Arc::new(RecordingReplicator::new());
        let workflows = Arc::new(RecordingWorkflowRunner::new());
        let collaborators =
            Collaborators::new(assets.clone(), replicator.clone(), workflows.clone());

        Self {
            assets,
            replicator,
            workflows,
            actions: DeferredActions::new(collaborators),
        }
    }
}

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}
