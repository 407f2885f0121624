//! Mirror core library — domain types, configuration, event model, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes ([`RepoName`], [`Actor`])
//! - [`config`] — immutable [`Config`] built once from the environment
//! - [`event`] — [`SyncEvent`], the webhook payload resolved to a tagged union
//! - [`auth`] — pull-request author allowlist check
//! - [`error`] — [`ConfigError`], [`EventError`]

pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, EventError};
pub use event::SyncEvent;
pub use types::{Actor, RepoName};
