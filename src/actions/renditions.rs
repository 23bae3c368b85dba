//! Rendition removal and per-rendition fan-out.

use crate::actions::traits::ItemAction;
use crate::collaborators::{AssetStore, Rendition};
use crate::constants::labels::{REMOVE_RENDITIONS, WITH_ALL_RENDITIONS};
use crate::error::{ActionError, ActionResult};
use crate::filters::{accepts_all, ItemFilter};
use crate::logging::{item_span, log_item_operation};
use crate::session::RepositorySession;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, Instrument};

/// Which renditions a removal deletes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenditionSelector {
    /// Everything except `original`
    AllButOriginal,
    /// Every rendition with this name, compared case-insensitively
    Named(String),
}

impl RenditionSelector {
    pub fn selects(&self, rendition: &Rendition) -> bool {
        match self {
            RenditionSelector::AllButOriginal => !rendition.is_original(),
            RenditionSelector::Named(name) => rendition.name_matches(name),
        }
    }
}

/// Deletes the selected renditions of each asset
pub struct RemoveRenditions {
    assets: Arc<dyn AssetStore>,
    selector: RenditionSelector,
}

impl RemoveRenditions {
    pub fn new(assets: Arc<dyn AssetStore>, selector: RenditionSelector) -> Self {
        Self { assets, selector }
    }

    pub fn selector(&self) -> &RenditionSelector {
        &self.selector
    }

    async fn remove(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        let asset = self
            .assets
            .resolve(&*session, path)
            .await?
            .ok_or_else(|| ActionError::AssetNotFound(path.to_string()))?;

        let mut removed = 0usize;
        for rendition in asset.renditions() {
            if self.selector.selects(rendition) {
                self.assets
                    .remove_rendition(session, &asset.path, &rendition.name)
                    .await?;
                removed += 1;
            }
        }

        log_item_operation(
            REMOVE_RENDITIONS,
            path,
            "completed",
            Some(&format!("removed {removed} rendition(s)")),
        );
        Ok(())
    }
}

#[async_trait]
impl ItemAction for RemoveRenditions {
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        self.remove(session, path)
            .instrument(item_span(REMOVE_RENDITIONS, path))
            .await
    }

    fn action_name(&self) -> &'static str {
        REMOVE_RENDITIONS
    }
}

/// Runs an action on the asset once for every rendition that passes all filters.
///
/// Filters see each rendition's own path; the wrapped action always receives the
/// asset path.
pub struct WithAllRenditions<A> {
    assets: Arc<dyn AssetStore>,
    action: A,
    filters: Vec<Box<dyn ItemFilter>>,
}

impl<A: ItemAction> WithAllRenditions<A> {
    pub fn new(assets: Arc<dyn AssetStore>, action: A, filters: Vec<Box<dyn ItemFilter>>) -> Self {
        Self {
            assets,
            action,
            filters,
        }
    }

    pub fn inner(&self) -> &A {
        &self.action
    }

    async fn fan_out(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        let asset = self
            .assets
            .resolve(&*session, path)
            .await?
            .ok_or_else(|| ActionError::AssetNotFound(path.to_string()))?;

        let mut invoked = 0usize;
        for rendition in asset.renditions() {
            if accepts_all(&self.filters, &*session, &rendition.path).await? {
                self.action.apply(session, path).await?;
                invoked += 1;
            }
        }

        debug!(
            path = %path,
            renditions = asset.renditions().len(),
            invoked,
            "Applied action across renditions"
        );
        Ok(())
    }
}

#[async_trait]
impl<A: ItemAction> ItemAction for WithAllRenditions<A> {
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        self.fan_out(session, path)
            .instrument(item_span(WITH_ALL_RENDITIONS, path))
            .await
    }

    fn action_name(&self) -> &'static str {
        WITH_ALL_RENDITIONS
    }
}
