//! Port trait definitions (Hexagonal Architecture)
//!
//! The overseer talks to GitHub exclusively through [`GitHubClient`];
//! transport, pagination, authentication and retries live in the
//! adapters that implement it.

pub mod github_client;

pub use github_client::GitHubClient;
