//! GitHub adapter.
//!
//! Implements the [`GitHubClient`](crate::domain::ports::GitHubClient)
//! port against github.com (or a GitHub Enterprise host) using the REST
//! API for labels and repositories and GraphQL for open issues.

pub mod client;
pub(crate) mod models;

pub use client::{GitHubClientConfig, GitHubClientImpl};
