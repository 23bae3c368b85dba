//! # System Constants
//!
//! Names, patterns, and labels shared by the filters and catalog actions.

/// Rendition names with special meaning
pub mod renditions {
    /// The unmodified upload; baseline for freshness checks
    pub const ORIGINAL: &str = "original";
}

/// Path patterns used by the built-in filters
pub mod patterns {
    /// Any path that lives below a `subassets` folder
    pub const SUBASSETS: &str = ".*?/subassets/.*";
}

/// Session user data markers
pub mod markers {
    /// Marks repository changes as made by a workflow process so that
    /// launchers listening for changes do not trigger on them again
    pub const CHANGED_BY_WORKFLOW_PROCESS: &str = "changedByWorkflowProcess";
}

/// Diagnostic label prefixes, combined with the item path as `<prefix>-<path>`
pub mod labels {
    pub const FILTER_NON_ASSETS: &str = "filterNonAssets";
    pub const FILTER_OUTDATED_RENDITIONS: &str = "filterAssetsWithOutdatedRenditions";
    pub const SYNTHETIC_WORKFLOW: &str = "synWf";
    pub const REMOVE_RENDITIONS: &str = "removeRenditions";
    pub const WITH_ALL_RENDITIONS: &str = "withAllRenditions";
    pub const ACTIVATE: &str = "activate";
    pub const DEACTIVATE: &str = "deactivate";
    pub const RETRY: &str = "retry";
}

/// Defaults applied when no configuration overrides them
pub mod defaults {
    pub const RETRY_MAX_ATTEMPTS: u32 = 3;
    pub const RETRY_DELAY_MS: u64 = 1000;
    pub const ENV_PREFIX: &str = "DEFERRED_ACTIONS";
}
