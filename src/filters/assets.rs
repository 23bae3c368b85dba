//! Filters that inspect the asset behind a path.

use super::ItemFilter;
use crate::collaborators::AssetStore;
use crate::constants::labels::{FILTER_NON_ASSETS, FILTER_OUTDATED_RENDITIONS};
use crate::error::ActionResult;
use crate::logging::item_span;
use crate::renditions::{self, Freshness};
use crate::session::RepositorySession;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{trace, Instrument};

/// Passes only paths that resolve to an asset.
///
/// Filtering in the candidate query is cheaper when the engine supports it.
pub struct IsValidAsset {
    assets: Arc<dyn AssetStore>,
}

impl IsValidAsset {
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { assets }
    }
}

#[async_trait]
impl ItemFilter for IsValidAsset {
    async fn accepts(&self, session: &dyn RepositorySession, path: &str) -> ActionResult<bool> {
        let resolved = self
            .assets
            .resolve(session, path)
            .instrument(item_span(FILTER_NON_ASSETS, path))
            .await?;
        Ok(resolved.is_some())
    }

    fn filter_name(&self) -> &'static str {
        FILTER_NON_ASSETS
    }
}

/// Passes assets whose renditions are missing or older than the original
pub struct HasOutdatedRenditions {
    assets: Arc<dyn AssetStore>,
}

impl HasOutdatedRenditions {
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { assets }
    }

    async fn freshness(
        &self,
        session: &dyn RepositorySession,
        path: &str,
    ) -> ActionResult<Option<Freshness>> {
        let asset = self.assets.resolve(session, path).await?;
        let freshness = asset.as_ref().map(renditions::assess);
        trace!(path = %path, freshness = ?freshness, "Assessed rendition freshness");
        Ok(freshness)
    }
}

#[async_trait]
impl ItemFilter for HasOutdatedRenditions {
    async fn accepts(&self, session: &dyn RepositorySession, path: &str) -> ActionResult<bool> {
        let freshness = self
            .freshness(session, path)
            .instrument(item_span(FILTER_OUTDATED_RENDITIONS, path))
            .await?;
        Ok(freshness.is_some_and(Freshness::needs_regeneration))
    }

    fn filter_name(&self) -> &'static str {
        FILTER_OUTDATED_RENDITIONS
    }
}
