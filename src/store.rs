//! Trait definition for pluggable store front adapters.
//!
//! Each store front (Walmart, Fischel, La Bomba, Sucre) implements
//! [`StoreAdapter`] to provide a uniform interface for fetching and
//! extracting product listings.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{Product, Store};
use async_trait::async_trait;

/// A pluggable store front adapter.
///
/// Implementors scrape a specific store's listing page and extract
/// structured [`Product`] values. Each adapter handles its own:
///
/// - Search URL construction with query encoding
/// - HTTP request with appropriate headers
/// - HTML parsing via CSS selectors
/// - Error handling for slow pages, missing selectors, or blocked requests
///
/// The trait is object-safe so a [`crate::StoreRegistry`] can hold a
/// heterogeneous, ordered list of adapters. All implementations must be
/// `Send + Sync`; each invocation runs on its own task.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Fetch product listings for `query`, at most `config.max_results`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails or times out, or
    /// the listing page cannot be parsed. Errors never abort the overall
    /// search; the orchestrator converts them into an empty result slot
    /// with a message.
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<Product>, SearchError>;

    /// Returns which [`Store`] variant this adapter scrapes.
    fn store(&self) -> Store;
}
