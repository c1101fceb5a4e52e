//! Error types for the medion-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Store-level errors (HTTP, parse, timeout)
//! are absorbed into [`crate::StoreResult::message`] by the orchestrator;
//! only configuration errors surface to callers of [`crate::search`].

/// Errors that can occur during product search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid search configuration, or a registry with no stores.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP request to a store front failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a store front's listing HTML.
    #[error("parse error: {0}")]
    Parse(String),

    /// A store front request timed out before the listing page loaded.
    #[error("timeout: {0}")]
    Timeout(String),
}

/// Convenience type alias for medion-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
