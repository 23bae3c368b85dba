//! Retry budgets and the retry/abort policy hook.

use crate::constants::defaults::{RETRY_DELAY_MS, RETRY_MAX_ATTEMPTS};
use crate::error::{ActionError, ActionResult};
use std::time::Duration;

/// Attempt budget and fixed pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` must be at least 1
    pub fn new(max_attempts: u32, delay: Duration) -> ActionResult<Self> {
        if max_attempts == 0 {
            return Err(ActionError::Validation(
                "retry policy requires max_attempts >= 1".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    /// No pause between attempts
    pub fn immediate(max_attempts: u32) -> ActionResult<Self> {
        Self::new(max_attempts, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetryDecision {
    /// Roll back and try again if budget remains
    Retry,
    /// Stop now and propagate the error
    Abort,
}

/// Decides whether a failed attempt should be retried
pub trait RetryClassifier: Send + Sync {
    /// `attempt` is the 1-based number of the attempt that just failed
    fn classify(&self, error: &ActionError, attempt: u32) -> RetryDecision;

    /// Get the classifier name for identification
    fn classifier_name(&self) -> &'static str;
}

/// Treats every error as a transient conflict
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryAll;

impl RetryClassifier for RetryAll {
    fn classify(&self, _error: &ActionError, _attempt: u32) -> RetryDecision {
        RetryDecision::Retry
    }

    fn classifier_name(&self) -> &'static str {
        "retry_all"
    }
}

/// Aborts on errors that no amount of rollback can fix
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipPermanentErrors;

impl RetryClassifier for SkipPermanentErrors {
    fn classify(&self, error: &ActionError, _attempt: u32) -> RetryDecision {
        match error {
            ActionError::AssetNotFound(_)
            | ActionError::Validation(_)
            | ActionError::Configuration(_)
            | ActionError::Interrupted { .. } => RetryDecision::Abort,
            _ => RetryDecision::Retry,
        }
    }

    fn classifier_name(&self) -> &'static str {
        "skip_permanent_errors"
    }
}

/// Classifier backed by a closure
pub struct FnClassifier<F> {
    name: &'static str,
    classify: F,
}

impl<F> FnClassifier<F>
where
    F: Fn(&ActionError, u32) -> RetryDecision + Send + Sync,
{
    pub fn new(name: &'static str, classify: F) -> Self {
        Self { name, classify }
    }
}

impl<F> RetryClassifier for FnClassifier<F>
where
    F: Fn(&ActionError, u32) -> RetryDecision + Send + Sync,
{
    fn classify(&self, error: &ActionError, attempt: u32) -> RetryDecision {
        (self.classify)(error, attempt)
    }

    fn classifier_name(&self) -> &'static str {
        self.name
    }
}
