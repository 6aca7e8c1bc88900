//! crates/cinematcher_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the generative-AI provider and of the local storage backend.

use async_trait::async_trait;

use crate::domain::{MatchResult, TimeBucket};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The remote service failed or replied with something unusable.
    /// The message is shown to the user verbatim.
    #[error("{0}")]
    Service(String),
    /// The local key-value storage could not be read or written.
    #[error("Storage failure: {0}")]
    Store(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Asks the service for three titles fitting `time` and the non-blank `clues`.
    /// Every call goes to the network; nothing is cached.
    async fn fetch_match(&self, time: TimeBucket, clues: &[String]) -> PortResult<MatchResult>;
}

/// An opaque string key-value namespace, such as a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written or was removed.
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> PortResult<()>;
}
