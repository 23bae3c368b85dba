//! # Rendition Freshness
//!
//! Classifies an asset's derived renditions against its `original` rendition.
//! An asset needs its renditions (re)generated when any rendition is older than
//! the original, or when the original is the only rendition there is.

use crate::collaborators::{Asset, Rendition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Every derived rendition is at least as new as the original
    Fresh,
    /// A rendition predates the original, or no derived renditions exist yet
    Outdated,
    /// The asset has no `original` rendition to compare against
    NoReference,
}

impl Freshness {
    /// Whether the asset should be picked up for rendition regeneration.
    ///
    /// Assets without a reference are skipped.
    pub fn needs_regeneration(self) -> bool {
        matches!(self, Freshness::Outdated)
    }
}

/// Classify `renditions` (including the original itself) against `reference`.
pub fn classify(reference: DateTime<Utc>, renditions: &[Rendition]) -> Freshness {
    let mut count = 0usize;
    for rendition in renditions {
        count += 1;
        if rendition.created_at < reference {
            return Freshness::Outdated;
        }
    }

    // Only the original: nothing has been generated yet.
    if count <= 1 {
        Freshness::Outdated
    } else {
        Freshness::Fresh
    }
}

/// Classify an asset using its `original` rendition as the reference
pub fn assess(asset: &Asset) -> Freshness {
    match asset.original() {
        Some(original) => classify(original.created_at, asset.renditions()),
        None => Freshness::NoReference,
    }
}
