#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Deferred Actions
//!
//! Composable, retryable units of work for batch processing over content
//! repository items.
//!
//! ## Overview
//!
//! A batch engine selects candidate item paths, runs each one through filters and
//! hands the survivors to an action on a worker pool. This crate supplies the
//! pieces it composes:
//!
//! - **Filters** over item paths: full-string regex matching, subasset exclusion,
//!   asset validity and rendition freshness, with negation and sequencing
//! - **Retry** with rollback: a wrapped action is re-run after reverting and
//!   refreshing the session, up to a bounded number of attempts
//! - **Round robin** distribution of replication targets across a batch
//! - **Catalog actions**: activate, deactivate, rendition removal, per-rendition
//!   fan-out and synthetic workflow execution
//!
//! The crate never spawns tasks. Concurrency belongs to the caller's worker pool;
//! every action is `Send + Sync` and borrows one session per item.
//!
//! ## Module Organization
//!
//! - [`actions`] - Action traits, adapters and the [`DeferredActions`] catalog
//! - [`filters`] - Item predicates and their combinators
//! - [`retry`] - Retry policy, classifiers and wrappers
//! - [`round_robin`] - Cyclic target distribution
//! - [`renditions`] - Rendition freshness classification
//! - [`collaborators`] - Traits over asset storage, replication and workflows
//! - [`session`] - The repository session abstraction
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup and span helpers
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deferred_actions::{ActionExt, Collaborators, DeferredActions, ItemAction, RetryPolicy};
//! use deferred_actions::session::RepositorySession;
//! use std::time::Duration;
//!
//! # async fn example(
//! #     collaborators: Collaborators,
//! #     session: &mut dyn RepositorySession,
//! # ) -> deferred_actions::ActionResult<()> {
//! deferred_actions::logging::init_structured_logging();
//!
//! let actions = DeferredActions::new(collaborators);
//! let activate = actions
//!     .activate_all()
//!     .with_retry(RetryPolicy::new(5, Duration::from_millis(500))?);
//!
//! activate.apply(session, "/content/dam/campaigns/hero.jpg").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit and integration tests
//! cargo bench --features benchmarks
//! ```

pub mod actions;
pub mod collaborators;
pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod logging;
pub mod renditions;
pub mod retry;
pub mod round_robin;
pub mod session;

pub use actions::{
    action_fn, work_fn, ActionExt, Bound, DeferredActions, ItemAction, SessionWork, WorkExt,
};
pub use collaborators::{
    Asset, AssetStore, Collaborators, Rendition, ReplicationActionType, ReplicationOptions,
    Replicator, WorkflowModel, WorkflowRunner,
};
pub use config::{ConfigManager, DeferredActionsConfig, RetryConfig};
pub use error::{ActionError, ActionResult};
pub use filters::{FilterExt, ItemFilter};
pub use renditions::Freshness;
pub use retry::{RetryClassifier, RetryDecision, RetryPolicy, RetryableAction, RetryableWork};
pub use round_robin::{RoundRobin, RoundRobinCursor, SharedCursor};
pub use session::RepositorySession;
