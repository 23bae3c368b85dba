//! # Action Traits
//!
//! The two shapes of work the batch engine invokes:
//!
//! - [`ItemAction`] runs against one item path with the caller's session, once per
//!   item of a batch
//! - [`SessionWork`] runs against the session alone, for single deferred
//!   invocations where the target is already bound
//!
//! Both are `Send + Sync` so one instance can be shared by a whole worker pool.

use crate::actions::adapters::Bound;
use crate::error::ActionResult;
use crate::retry::{RetryPolicy, RetryableAction, RetryableWork};
use crate::session::RepositorySession;
use async_trait::async_trait;
use std::sync::Arc;

/// Work applied to one item path
#[async_trait]
pub trait ItemAction: Send + Sync {
    /// Apply the action to `path` using the caller's session
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()>;

    /// Get the action name for identification
    ///
    /// Used in log fields. Default implementation returns the type name.
    fn action_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Work that needs only the session
#[async_trait]
pub trait SessionWork: Send + Sync {
    async fn run(&self, session: &mut dyn RepositorySession) -> ActionResult<()>;

    fn work_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// The item this work is bound to, if any
    fn target_path(&self) -> Option<&str> {
        None
    }
}

#[async_trait]
impl<A: ItemAction + ?Sized> ItemAction for Box<A> {
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        (**self).apply(session, path).await
    }

    fn action_name(&self) -> &'static str {
        (**self).action_name()
    }
}

#[async_trait]
impl<A: ItemAction + ?Sized> ItemAction for Arc<A> {
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        (**self).apply(session, path).await
    }

    fn action_name(&self) -> &'static str {
        (**self).action_name()
    }
}

#[async_trait]
impl<W: SessionWork + ?Sized> SessionWork for Box<W> {
    async fn run(&self, session: &mut dyn RepositorySession) -> ActionResult<()> {
        (**self).run(session).await
    }

    fn work_name(&self) -> &str {
        (**self).work_name()
    }

    fn target_path(&self) -> Option<&str> {
        (**self).target_path()
    }
}

#[async_trait]
impl<W: SessionWork + ?Sized> SessionWork for Arc<W> {
    async fn run(&self, session: &mut dyn RepositorySession) -> ActionResult<()> {
        (**self).run(session).await
    }

    fn work_name(&self) -> &str {
        (**self).work_name()
    }

    fn target_path(&self) -> Option<&str> {
        (**self).target_path()
    }
}

/// Combinators available on every [`ItemAction`]
pub trait ActionExt: ItemAction + Sized {
    /// Wrap in bounded retry with rollback
    fn with_retry(self, policy: RetryPolicy) -> RetryableAction<Self> {
        RetryableAction::new(policy, self)
    }

    /// Fix the target path, turning the action into [`SessionWork`]
    fn bind(self, path: impl Into<String>) -> Bound<Self> {
        Bound::new(self, path)
    }

    fn boxed(self) -> Box<dyn ItemAction>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<A: ItemAction> ActionExt for A {}

/// Combinators available on every [`SessionWork`]
pub trait WorkExt: SessionWork + Sized {
    fn with_retry(self, policy: RetryPolicy) -> RetryableWork<Self> {
        RetryableWork::new(policy, self)
    }
}

impl<W: SessionWork> WorkExt for W {}
