//! # mirror-gitlab
//!
//! Authenticated GitLab REST API client for mirror synchronization.
//!
//! The client issues exactly one attempt per call (no retries — the
//! orchestrator's steps are idempotent, so a re-invocation is always safe)
//! and classifies error responses: a fixed allowlist of "the desired state
//! already holds" messages resolves successfully, everything else fails.

pub mod client;
pub mod error;

pub use client::{ApiResponse, GitlabClient, Project, BENIGN_ERRORS};
pub use error::ApiError;
