//! # medion-search
//!
//! Concurrent product price search across Costa Rican store fronts.
//!
//! This crate queries several independent stores (Walmart, Farmacia
//! Fischel, Farmacia La Bomba, Farmacia Sucre) for a product query at the
//! same time and returns one result slot per store. Listings are scraped
//! from public search pages using CSS selectors on HTML responses — no
//! API keys, no browser automation, no external services.
//!
//! ## Design
//!
//! - One isolated tokio task per store, raced against a per-store budget
//! - A failing, hanging, or crashing store degrades to an empty slot with
//!   an explanatory message; sibling stores are unaffected
//! - Result slots always come back in registry order, one per store,
//!   regardless of completion order
//! - User-Agent rotation and request jitter for reliability
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at trace level

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod registry;
pub mod store;
pub mod stores;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use registry::StoreRegistry;
pub use store::StoreAdapter;
pub use types::{Product, Store, StoreResult};

/// Search all configured stores concurrently.
///
/// Queries every store in `config.stores`, each on its own task under its
/// own budget, and returns one [`StoreResult`] per store in configuration
/// order. A store that fails or times out still occupies its slot, with
/// empty products and a message explaining why.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the configuration is invalid (zero
/// limit, zero timeout, no stores). Individual store failures never cause
/// an error; they are reported inside the corresponding slot.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> medion_search::Result<()> {
/// let config = medion_search::SearchConfig::default();
/// let results = medion_search::search("acetaminofen", &config).await?;
/// for slot in &results {
///     match &slot.message {
///         None => println!("{}: {} products", slot.store, slot.products.len()),
///         Some(message) => println!("{}: {}", slot.store, message),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<StoreResult>> {
    config.validate()?;
    let registry = StoreRegistry::from_stores(&config.stores);
    orchestrator::run(query, &registry, config).await
}

/// Search all stores with sensible default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> medion_search::Result<()> {
/// let results = medion_search::search_default("ibuprofeno").await?;
/// for slot in &results {
///     println!("{}: {} products", slot.store, slot.products.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_default(query: &str) -> Result<Vec<StoreResult>> {
    search(query, &SearchConfig::default()).await
}

/// Search using an explicit adapter registry.
///
/// Bypasses the built-in scrapers: the caller supplies the
/// [`StoreRegistry`], which also fixes the order of result slots. Useful
/// for custom adapter implementations and for tests with stub adapters.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the configuration is invalid or the
/// registry is empty.
pub async fn search_with_registry(
    query: &str,
    registry: &StoreRegistry,
    config: &SearchConfig,
) -> Result<Vec<StoreResult>> {
    config.validate()?;
    orchestrator::run(query, registry, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_max_results() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_results"));
    }

    #[tokio::test]
    async fn search_validates_config_empty_stores() {
        let config = SearchConfig {
            stores: vec![],
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("store"));
    }

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = SearchConfig {
            store_timeout_seconds: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_with_registry_rejects_empty_registry() {
        let registry = StoreRegistry::new(vec![]);
        let config = SearchConfig::default();
        let result = search_with_registry("test", &registry, &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("registry"));
    }
}
