//! Domain layer for the issue overseer
//!
//! This module contains the triage models, the GitHub port and the
//! domain error type. Nothing here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
