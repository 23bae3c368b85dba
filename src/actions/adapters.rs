//! Adapters between closures, actions and bound work.

use crate::actions::traits::{ItemAction, SessionWork};
use crate::error::ActionResult;
use crate::session::RepositorySession;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// An [`ItemAction`] backed by an async closure
pub struct FnAction<F> {
    name: &'static str,
    func: F,
}

/// Lift a closure returning a boxed future into an [`ItemAction`]
///
/// ```rust
/// use deferred_actions::actions::action_fn;
/// use deferred_actions::ActionError;
///
/// let mark = action_fn(|session, _path| {
///     Box::pin(async move {
///         session.set_user_data("batch-import")?;
///         Ok::<(), ActionError>(())
///     })
/// });
/// # let _ = mark;
/// ```
pub fn action_fn<F>(func: F) -> FnAction<F>
where
    F: for<'a> Fn(&'a mut dyn RepositorySession, &'a str) -> BoxFuture<'a, ActionResult<()>>
        + Send
        + Sync,
{
    FnAction {
        name: "fn_action",
        func,
    }
}

impl<F> FnAction<F> {
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

#[async_trait]
impl<F> ItemAction for FnAction<F>
where
    F: for<'a> Fn(&'a mut dyn RepositorySession, &'a str) -> BoxFuture<'a, ActionResult<()>>
        + Send
        + Sync,
{
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        (self.func)(session, path).await
    }

    fn action_name(&self) -> &'static str {
        self.name
    }
}

/// A [`SessionWork`] backed by an async closure
pub struct FnWork<F> {
    name: String,
    func: F,
}

pub fn work_fn<F>(name: impl Into<String>, func: F) -> FnWork<F>
where
    F: for<'a> Fn(&'a mut dyn RepositorySession) -> BoxFuture<'a, ActionResult<()>> + Send + Sync,
{
    FnWork {
        name: name.into(),
        func,
    }
}

#[async_trait]
impl<F> SessionWork for FnWork<F>
where
    F: for<'a> Fn(&'a mut dyn RepositorySession) -> BoxFuture<'a, ActionResult<()>> + Send + Sync,
{
    async fn run(&self, session: &mut dyn RepositorySession) -> ActionResult<()> {
        (self.func)(session).await
    }

    fn work_name(&self) -> &str {
        &self.name
    }
}

/// An item action with its path fixed in advance
#[derive(Debug)]
pub struct Bound<A> {
    action: A,
    path: String,
}

impl<A> Bound<A> {
    pub fn new(action: A, path: impl Into<String>) -> Self {
        Self {
            action,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn action(&self) -> &A {
        &self.action
    }
}

#[async_trait]
impl<A: ItemAction> SessionWork for Bound<A> {
    async fn run(&self, session: &mut dyn RepositorySession) -> ActionResult<()> {
        self.action.apply(session, &self.path).await
    }

    fn work_name(&self) -> &str {
        &self.path
    }

    fn target_path(&self) -> Option<&str> {
        Some(&self.path)
    }
}
