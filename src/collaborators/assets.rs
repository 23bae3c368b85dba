//! Asset inspection and rendition storage.

use crate::constants::renditions::ORIGINAL;
use crate::error::ActionResult;
use crate::session::RepositorySession;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One derived artifact of an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    /// Rendition name, e.g. `original` or `cq5dam.thumbnail.48.48.png`
    pub name: String,
    /// Repository path of the rendition node itself
    pub path: String,
    /// When the rendition was created
    pub created_at: DateTime<Utc>,
}

impl Rendition {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            created_at,
        }
    }

    pub fn is_original(&self) -> bool {
        self.name_matches(ORIGINAL)
    }

    /// Compare the rendition name to `name`, ignoring case (Unicode-aware)
    pub fn name_matches(&self, name: &str) -> bool {
        names_equal_ignore_case(&self.name, name)
    }
}

/// Case-insensitive name comparison using full Unicode lowercase mapping
pub fn names_equal_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Snapshot of an asset with its renditions in repository order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub path: String,
    pub renditions: Vec<Rendition>,
}

impl Asset {
    pub fn new(path: impl Into<String>, renditions: Vec<Rendition>) -> Self {
        Self {
            path: path.into(),
            renditions,
        }
    }

    pub fn renditions(&self) -> &[Rendition] {
        &self.renditions
    }

    /// Look up a rendition by its exact name
    pub fn rendition(&self, name: &str) -> Option<&Rendition> {
        self.renditions.iter().find(|r| r.name == name)
    }

    pub fn original(&self) -> Option<&Rendition> {
        self.rendition(ORIGINAL)
    }
}

/// Resolves repository paths to assets and mutates their renditions
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Resolve `path` to an asset.
    ///
    /// Returns `Ok(None)` when nothing exists at the path or the node is not an asset.
    async fn resolve(
        &self,
        session: &dyn RepositorySession,
        path: &str,
    ) -> ActionResult<Option<Asset>>;

    /// Remove the rendition `name` from the asset at `asset_path`
    async fn remove_rendition(
        &self,
        session: &mut dyn RepositorySession,
        asset_path: &str,
        name: &str,
    ) -> ActionResult<()>;
}
