//! # Retry Module
//!
//! Bounded retry with rollback for units of work that commit their own changes.
//!
//! ## State machine
//!
//! ```text
//! Attempting(remaining = max_attempts)
//!     │ Ok                          │ Err
//!     ▼                             ▼
//!  Success                     Recovering: revert, refresh, remaining -= 1
//!                                   │ remaining == 0 or classifier says Abort
//!                                   ├──────────────▶ Failed (last error re-raised)
//!                                   │ otherwise
//!                                   ▼
//!                              sleep(delay) ──cancelled──▶ Interrupted
//!                                   │
//!                                   └──────────▶ Attempting
//! ```
//!
//! Every error is retried unless the configured [`RetryClassifier`] says
//! otherwise. The default, [`RetryAll`], never aborts early.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use deferred_actions::actions::action_fn;
//! use deferred_actions::retry::{RetryPolicy, RetryableAction};
//! use deferred_actions::ActionError;
//! use std::time::Duration;
//!
//! # fn example() -> deferred_actions::ActionResult<()> {
//! let commit = action_fn(|session, path| {
//!     Box::pin(async move {
//!         tracing::info!(path = %path, user = %session.user_id(), "committing");
//!         Ok::<(), ActionError>(())
//!     })
//! });
//!
//! let policy = RetryPolicy::new(5, Duration::from_millis(250))?;
//! let retrying = RetryableAction::new(policy, commit);
//! # let _ = retrying;
//! # Ok(())
//! # }
//! ```

pub mod executor;
pub mod policy;

pub use executor::{RetryableAction, RetryableWork};
pub use policy::{
    FnClassifier, RetryAll, RetryClassifier, RetryDecision, RetryPolicy, SkipPermanentErrors,
};
