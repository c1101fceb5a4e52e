//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which stores are queried, per-store budgets,
//! and request behaviour. The defaults are tuned for reliable, polite
//! scraping of the supported store fronts.

use crate::error::SearchError;
use crate::types::Store;

/// Configuration for a product search operation.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Which stores to query. Queried concurrently; result slots come
    /// back in this order, one per store.
    pub stores: Vec<Store>,
    /// Maximum number of products to return per store.
    pub max_results: usize,
    /// Hard per-store budget in seconds. A store still running when this
    /// expires is abandoned and reported as timed out; other stores are
    /// unaffected.
    pub store_timeout_seconds: u64,
    /// Per-request HTTP timeout in seconds, applied inside each store's
    /// fetch. Must not exceed `store_timeout_seconds`.
    pub request_timeout_seconds: u64,
    /// Random delay range in milliseconds `(min, max)` before each store
    /// request. Spreads concurrent requests over time.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stores: Store::all().to_vec(),
            max_results: 5,
            store_timeout_seconds: 60,
            request_timeout_seconds: 20,
            request_delay_ms: (100, 400),
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `store_timeout_seconds` must be greater than 0
    /// - `request_timeout_seconds` must be greater than 0 and must not
    ///   exceed `store_timeout_seconds`
    /// - `stores` must not be empty
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.store_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "store_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "request_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.request_timeout_seconds > self.store_timeout_seconds {
            return Err(SearchError::Config(
                "request_timeout_seconds must not exceed store_timeout_seconds".into(),
            ));
        }
        if self.stores.is_empty() {
            return Err(SearchError::Config(
                "at least one store must be enabled".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}
