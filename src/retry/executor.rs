//! Retry wrappers for item actions and session work.

use super::policy::{RetryAll, RetryClassifier, RetryDecision, RetryPolicy};
use crate::actions::{ItemAction, SessionWork};
use crate::constants::labels::RETRY;
use crate::error::{ActionError, ActionResult};
use crate::logging::{item_span, work_span};
use crate::session::RepositorySession;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

/// Policy, classifier, and cancellation shared by both retry wrappers
#[derive(Clone)]
struct RetrySettings {
    policy: RetryPolicy,
    classifier: Arc<dyn RetryClassifier>,
    cancellation: Option<CancellationToken>,
}

impl RetrySettings {
    fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            classifier: Arc::new(RetryAll),
            cancellation: None,
        }
    }

    /// Sleep out the inter-attempt delay. Returns `false` when cancelled.
    async fn pause(&self) -> bool {
        let delay = self.policy.delay();
        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => false,
                    _ = tokio::time::sleep(delay) => true,
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                true
            }
        }
    }

    async fn run(
        &self,
        session: &mut dyn RepositorySession,
        subject: &str,
        attempt: &dyn Attempt,
    ) -> ActionResult<()> {
        let max_attempts = self.policy.max_attempts();
        let mut remaining = max_attempts;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let error = match attempt.run_once(session).await {
                Ok(()) => {
                    if attempts > 1 {
                        debug!(subject = %subject, attempts, "Succeeded after retry");
                    }
                    return Ok(());
                }
                Err(error) => error,
            };

            // The failed attempt may have left uncommitted changes behind.
            if let Err(rollback_error) = roll_back(session).await {
                warn!(
                    subject = %subject,
                    attempts,
                    error_code = error.error_code(),
                    error = %error,
                    rollback_error = %rollback_error,
                    "Rollback failed after attempt error"
                );
                return Err(rollback_error);
            }
            remaining -= 1;

            if remaining == 0 {
                warn!(
                    subject = %subject,
                    attempts,
                    error_code = error.error_code(),
                    error = %error,
                    "Retry budget exhausted"
                );
                return Err(error);
            }

            if self.classifier.classify(&error, attempts) == RetryDecision::Abort {
                warn!(
                    subject = %subject,
                    attempts,
                    classifier = self.classifier.classifier_name(),
                    error = %error,
                    "Error classified as not retryable"
                );
                return Err(error);
            }

            info!(
                subject = %subject,
                remaining,
                error_code = error.error_code(),
                error = %error,
                "Error during attempt, retry count is {remaining}"
            );

            if !self.pause().await {
                warn!(subject = %subject, attempts, "Retry interrupted during delay");
                return Err(ActionError::Interrupted { attempts });
            }
        }
    }
}

async fn roll_back(session: &mut dyn RepositorySession) -> ActionResult<()> {
    session.revert().await?;
    session.refresh().await
}

impl std::fmt::Debug for RetrySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrySettings")
            .field("policy", &self.policy)
            .field("classifier", &self.classifier.classifier_name())
            .field("cancellable", &self.cancellation.is_some())
            .finish()
    }
}

/// One invocation of the wrapped unit, whatever its arity
#[async_trait]
trait Attempt: Send + Sync {
    async fn run_once(&self, session: &mut dyn RepositorySession) -> ActionResult<()>;
}

struct ItemAttempt<'a, A> {
    action: &'a A,
    path: &'a str,
}

#[async_trait]
impl<'a, A: ItemAction> Attempt for ItemAttempt<'a, A> {
    async fn run_once(&self, session: &mut dyn RepositorySession) -> ActionResult<()> {
        self.action.apply(session, self.path).await
    }
}

struct WorkAttempt<'a, W>(&'a W);

#[async_trait]
impl<'a, W: SessionWork> Attempt for WorkAttempt<'a, W> {
    async fn run_once(&self, session: &mut dyn RepositorySession) -> ActionResult<()> {
        self.0.run(session).await
    }
}

/// Retrying wrapper around a session+path action
#[derive(Debug)]
pub struct RetryableAction<A> {
    action: A,
    settings: RetrySettings,
}

impl<A: ItemAction> RetryableAction<A> {
    pub fn new(policy: RetryPolicy, action: A) -> Self {
        Self {
            action,
            settings: RetrySettings::new(policy),
        }
    }

    /// Replace the default retry-everything policy hook
    pub fn with_classifier(mut self, classifier: Arc<dyn RetryClassifier>) -> Self {
        self.settings.classifier = classifier;
        self
    }

    /// Abort the retry sequence when `token` is cancelled during a delay
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.settings.cancellation = Some(token);
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.settings.policy
    }

    pub fn inner(&self) -> &A {
        &self.action
    }
}

#[async_trait]
impl<A: ItemAction> ItemAction for RetryableAction<A> {
    async fn apply(&self, session: &mut dyn RepositorySession, path: &str) -> ActionResult<()> {
        let attempt = ItemAttempt {
            action: &self.action,
            path,
        };
        self.settings
            .run(session, path, &attempt)
            .instrument(item_span(RETRY, path))
            .await
    }

    fn action_name(&self) -> &'static str {
        self.action.action_name()
    }
}

/// Retrying wrapper around session-only work
#[derive(Debug)]
pub struct RetryableWork<W> {
    work: W,
    settings: RetrySettings,
}

impl<W: SessionWork> RetryableWork<W> {
    pub fn new(policy: RetryPolicy, work: W) -> Self {
        Self {
            work,
            settings: RetrySettings::new(policy),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn RetryClassifier>) -> Self {
        self.settings.classifier = classifier;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.settings.cancellation = Some(token);
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.settings.policy
    }

    pub fn inner(&self) -> &W {
        &self.work
    }
}

#[async_trait]
impl<W: SessionWork> SessionWork for RetryableWork<W> {
    async fn run(&self, session: &mut dyn RepositorySession) -> ActionResult<()> {
        let subject = self.work.work_name();
        let span = match self.work.target_path() {
            Some(path) => item_span(RETRY, path),
            None => work_span(RETRY, subject),
        };
        self.settings
            .run(session, subject, &WorkAttempt(&self.work))
            .instrument(span)
            .await
    }

    fn work_name(&self) -> &str {
        self.work.work_name()
    }

    fn target_path(&self) -> Option<&str> {
        self.work.target_path()
    }
}
