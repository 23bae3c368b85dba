//! # Repository Session
//!
//! The transactional handle a batch engine hands to every action invocation.
//! Sessions are owned by the caller; actions only borrow them for the duration
//! of one item and never create, share, or close one.

use crate::error::ActionResult;
use async_trait::async_trait;

/// Caller-owned unit-of-work context over the content repository
#[async_trait]
pub trait RepositorySession: Send + Sync {
    /// Discard any uncommitted local changes
    async fn revert(&mut self) -> ActionResult<()>;

    /// Resynchronize with the backing store so later reads see concurrent writes
    async fn refresh(&mut self) -> ActionResult<()>;

    /// Attach a provenance marker to changes made through this session
    fn set_user_data(&mut self, marker: &str) -> ActionResult<()>;

    /// Identifier of the user the session acts for, used in log fields
    fn user_id(&self) -> &str {
        "unknown"
    }
}
