//! # mirror-sync
//!
//! The mirror synchronization orchestrator.
//!
//! Call [`pipeline::run`] with a resolved [`SyncEvent`] to drive the full
//! reconciliation chain: project → runner → hook → clone → remote → push.
//! Each step is idempotent against remote state; the first unhandled
//! failure aborts the run and names the failing step.
//!
//! [`SyncEvent`]: mirror_core::SyncEvent

pub mod error;
pub mod pipeline;
pub mod step;

pub use error::SyncError;
pub use pipeline::{run, MirrorHost, WorkingCopyStore};
pub use step::{PushedRef, SyncOutcome, SyncStep};
