//! # Action Catalog
//!
//! Ready-made actions for deferred batch processing and the traits they share.
//!
//! A batch driver selects candidate items, evaluates filters, and then applies one
//! action per item on a worker pool. Everything here is built for that driver:
//! actions are `Send + Sync`, never spawn tasks of their own, and borrow the
//! session exclusively for the duration of one item.
//!
//! [`DeferredActions`] is the usual entry point; the action types are public for
//! callers who want to assemble them by hand.

pub mod adapters;
pub mod catalog;
pub mod renditions;
pub mod replication;
pub mod traits;
pub mod workflow;

pub use adapters::{action_fn, work_fn, Bound, FnAction, FnWork};
pub use catalog::DeferredActions;
pub use renditions::{RemoveRenditions, RenditionSelector, WithAllRenditions};
pub use replication::{Replicate, TargetSelection};
pub use traits::{ActionExt, ItemAction, SessionWork, WorkExt};
pub use workflow::StartSyntheticWorkflow;
