//! # Deferred Actions Factory
//!
//! [`DeferredActions`] hands out filters and actions wired to the injected
//! collaborators. It holds only `Arc` handles and the loaded configuration, so it
//! is cheap to clone into every batch definition.

use crate::actions::adapters::Bound;
use crate::actions::renditions::{RemoveRenditions, RenditionSelector, WithAllRenditions};
use crate::actions::replication::{Replicate, TargetSelection};
use crate::actions::traits::{ActionExt, ItemAction, SessionWork};
use crate::actions::workflow::StartSyntheticWorkflow;
use crate::collaborators::{Collaborators, ReplicationActionType, ReplicationOptions, WorkflowModel};
use crate::config::DeferredActionsConfig;
use crate::error::ActionResult;
use crate::filters::{self, HasOutdatedRenditions, IsValidAsset, ItemFilter, Not, PathMatches};
use crate::retry::{RetryPolicy, RetryableAction, RetryableWork};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DeferredActions {
    collaborators: Collaborators,
    config: DeferredActionsConfig,
    default_policy: RetryPolicy,
}

impl DeferredActions {
    /// Catalog with the built-in defaults (3 attempts, 1s apart)
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            config: DeferredActionsConfig::default(),
            default_policy: RetryPolicy::default(),
        }
    }

    pub fn with_config(
        collaborators: Collaborators,
        config: DeferredActionsConfig,
    ) -> ActionResult<Self> {
        config.validate()?;
        let default_policy = config.retry.policy()?;
        debug!(
            max_attempts = default_policy.max_attempts(),
            delay_ms = config.retry.delay_ms,
            "Deferred actions catalog configured"
        );
        Ok(Self {
            collaborators,
            config,
            default_policy,
        })
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn config(&self) -> &DeferredActionsConfig {
        &self.config
    }

    /// Policy used by the `*_with_defaults` wrappers
    pub fn default_policy(&self) -> RetryPolicy {
        self.default_policy
    }

    // ===== Filters =====

    pub fn filter_matching(&self, pattern: &str) -> ActionResult<PathMatches> {
        filters::matching(pattern)
    }

    pub fn filter_not_matching(&self, pattern: &str) -> ActionResult<Not<PathMatches>> {
        filters::not_matching(pattern)
    }

    pub fn filter_out_subassets(&self) -> Not<PathMatches> {
        filters::exclude_subassets()
    }

    pub fn filter_non_assets(&self) -> IsValidAsset {
        IsValidAsset::new(self.collaborators.assets.clone())
    }

    pub fn filter_assets_with_outdated_renditions(&self) -> HasOutdatedRenditions {
        HasOutdatedRenditions::new(self.collaborators.assets.clone())
    }

    // ===== Retry =====

    /// Retry an item action up to `policy.max_attempts()` times
    pub fn retry_all<A: ItemAction>(&self, policy: RetryPolicy, action: A) -> RetryableAction<A> {
        action.with_retry(policy)
    }

    /// Retry session work up to `policy.max_attempts()` times
    pub fn retry<W: SessionWork>(&self, policy: RetryPolicy, work: W) -> RetryableWork<W> {
        RetryableWork::new(policy, work)
    }

    pub fn retry_all_with_defaults<A: ItemAction>(&self, action: A) -> RetryableAction<A> {
        self.retry_all(self.default_policy, action)
    }

    pub fn retry_with_defaults<W: SessionWork>(&self, work: W) -> RetryableWork<W> {
        self.retry(self.default_policy, work)
    }

    // ===== Item actions =====

    pub fn activate_all(&self) -> Replicate {
        self.replicate(ReplicationActionType::Activate, TargetSelection::Default)
    }

    pub fn activate_all_with_options(&self, options: ReplicationOptions) -> Replicate {
        self.replicate(
            ReplicationActionType::Activate,
            TargetSelection::Fixed(options),
        )
    }

    /// Activate each item with the next options in rotation.
    ///
    /// One rotation is shared by every worker using the returned action, so a
    /// batch of M items over N option sets gives each set `M / N` items and the
    /// first `M mod N` sets one more.
    pub fn activate_all_with_round_robin(
        &self,
        options: Vec<ReplicationOptions>,
    ) -> ActionResult<Replicate> {
        let targets = TargetSelection::round_robin(options)?;
        Ok(self.replicate(ReplicationActionType::Activate, targets))
    }

    pub fn deactivate_all(&self) -> Replicate {
        self.replicate(ReplicationActionType::Deactivate, TargetSelection::Default)
    }

    pub fn deactivate_all_with_options(&self, options: ReplicationOptions) -> Replicate {
        self.replicate(
            ReplicationActionType::Deactivate,
            TargetSelection::Fixed(options),
        )
    }

    /// Remove every rendition except `original`
    pub fn remove_all_renditions(&self) -> RemoveRenditions {
        RemoveRenditions::new(
            self.collaborators.assets.clone(),
            RenditionSelector::AllButOriginal,
        )
    }

    /// Remove every rendition called `name` (case-insensitive)
    pub fn remove_all_renditions_named(&self, name: impl Into<String>) -> RemoveRenditions {
        RemoveRenditions::new(
            self.collaborators.assets.clone(),
            RenditionSelector::Named(name.into()),
        )
    }

    pub fn with_all_renditions<A: ItemAction>(
        &self,
        action: A,
        filters: Vec<Box<dyn ItemFilter>>,
    ) -> WithAllRenditions<A> {
        WithAllRenditions::new(self.collaborators.assets.clone(), action, filters)
    }

    pub fn start_synthetic_workflows(&self, model: WorkflowModel) -> StartSyntheticWorkflow {
        StartSyntheticWorkflow::new(self.collaborators.workflow_runner.clone(), model)
    }

    // ===== Single work =====

    pub fn start_synthetic_workflow(
        &self,
        model: WorkflowModel,
        path: impl Into<String>,
    ) -> Bound<StartSyntheticWorkflow> {
        self.start_synthetic_workflows(model).bind(path)
    }

    pub fn remove_renditions(&self, path: impl Into<String>) -> Bound<RemoveRenditions> {
        self.remove_all_renditions().bind(path)
    }

    pub fn remove_renditions_named(
        &self,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Bound<RemoveRenditions> {
        self.remove_all_renditions_named(name).bind(path)
    }

    pub fn activate(&self, path: impl Into<String>) -> Bound<Replicate> {
        self.activate_all().bind(path)
    }

    pub fn activate_with_options(
        &self,
        path: impl Into<String>,
        options: ReplicationOptions,
    ) -> Bound<Replicate> {
        self.activate_all_with_options(options).bind(path)
    }

    pub fn deactivate(&self, path: impl Into<String>) -> Bound<Replicate> {
        self.deactivate_all().bind(path)
    }

    pub fn deactivate_with_options(
        &self,
        path: impl Into<String>,
        options: ReplicationOptions,
    ) -> Bound<Replicate> {
        self.deactivate_all_with_options(options).bind(path)
    }

    fn replicate(&self, action_type: ReplicationActionType, targets: TargetSelection) -> Replicate {
        Replicate::new(self.collaborators.replicator.clone(), action_type, targets)
    }
}
