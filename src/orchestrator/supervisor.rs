//! Per-store task supervision: isolation, timeout, and failure capture.
//!
//! Each store fetch runs on its own tokio task so a hang, error, or panic
//! in one store cannot block or corrupt its siblings. The supervisor races
//! the task against the per-store budget and always produces a
//! [`StoreResult`] — store-level failures are rendered as data, never
//! raised to the orchestrator.

use crate::config::SearchConfig;
use crate::store::StoreAdapter;
use crate::types::StoreResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Run one store adapter to completion under the per-store budget.
///
/// Outcomes:
/// - fetch returns products → slot with those products, no message
/// - fetch returns no products → empty slot, "no products found"
/// - fetch returns an error → empty slot with the error as message
/// - budget expires → the task is abandoned (best effort abort) and the
///   slot reports the timeout; a late result is discarded with the task
/// - the task panics → empty slot with an "unexpected error" message
pub async fn supervise(
    adapter: Arc<dyn StoreAdapter>,
    query: String,
    config: SearchConfig,
) -> StoreResult {
    let store = adapter.store();
    let budget_secs = config.store_timeout_seconds;
    let budget = Duration::from_secs(budget_secs);

    let mut task = tokio::spawn(async move { adapter.fetch(&query, &config).await });

    match timeout(budget, &mut task).await {
        Ok(Ok(Ok(products))) => {
            tracing::debug!(store = store.name(), count = products.len(), "store fetch completed");
            StoreResult::from_products(store, products)
        }
        Ok(Ok(Err(e))) => {
            tracing::warn!(store = store.name(), error = %e, "store fetch failed");
            StoreResult::failed(store, e.to_string())
        }
        Ok(Err(join_err)) => {
            tracing::warn!(store = store.name(), error = %join_err, "store task fault");
            StoreResult::failed(store, format!("unexpected error: {join_err}"))
        }
        Err(_) => {
            // Stop waiting; whatever the abandoned task produces is dropped with it.
            task.abort();
            tracing::warn!(store = store.name(), budget_s = budget_secs, "store fetch timed out");
            StoreResult::failed(store, format!("timed out after {budget_secs}s"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::types::{Product, Store};
    use async_trait::async_trait;

    enum StubBehavior {
        Products(usize),
        Empty,
        Fail,
        Hang,
        Panic,
    }

    struct StubAdapter {
        store: Store,
        behavior: StubBehavior,
    }

    #[async_trait]
    impl StoreAdapter for StubAdapter {
        async fn fetch(
            &self,
            _query: &str,
            _config: &SearchConfig,
        ) -> Result<Vec<Product>, SearchError> {
            match self.behavior {
                StubBehavior::Products(n) => Ok((0..n)
                    .map(|i| Product {
                        description: format!("item {i}"),
                        price: format!("₡{}", 100 * (i + 1)),
                        url: format!("https://example.com/{i}"),
                    })
                    .collect()),
                StubBehavior::Empty => Ok(vec![]),
                StubBehavior::Fail => Err(SearchError::Http("503 Service Unavailable".into())),
                StubBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(vec![])
                }
                StubBehavior::Panic => panic!("stub adapter exploded"),
            }
        }

        fn store(&self) -> Store {
            self.store
        }
    }

    fn stub(store: Store, behavior: StubBehavior) -> Arc<dyn StoreAdapter> {
        Arc::new(StubAdapter { store, behavior })
    }

    fn fast_config() -> SearchConfig {
        SearchConfig {
            store_timeout_seconds: 1,
            request_timeout_seconds: 1,
            request_delay_ms: (0, 0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn successful_fetch_keeps_products_verbatim() {
        let adapter = stub(Store::Walmart, StubBehavior::Products(3));
        let result = supervise(adapter, "q".into(), fast_config()).await;
        assert_eq!(result.store, "Walmart");
        assert_eq!(result.products.len(), 3);
        assert!(result.message.is_none());
    }

    #[tokio::test]
    async fn empty_fetch_sets_benign_message() {
        let adapter = stub(Store::Sucre, StubBehavior::Empty);
        let result = supervise(adapter, "q".into(), fast_config()).await;
        assert!(result.products.is_empty());
        assert_eq!(result.message.as_deref(), Some("no products found"));
    }

    #[tokio::test]
    async fn failed_fetch_is_absorbed_as_message() {
        let adapter = stub(Store::Fischel, StubBehavior::Fail);
        let result = supervise(adapter, "q".into(), fast_config()).await;
        assert!(result.products.is_empty());
        let message = result.message.expect("failure should carry a message");
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn hung_fetch_reports_timeout_within_budget() {
        let adapter = stub(Store::LaBomba, StubBehavior::Hang);
        let started = std::time::Instant::now();
        let result = supervise(adapter, "q".into(), fast_config()).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(result.products.is_empty());
        assert_eq!(result.message.as_deref(), Some("timed out after 1s"));
    }

    #[tokio::test]
    async fn panicking_fetch_is_absorbed_as_unexpected_error() {
        let adapter = stub(Store::Walmart, StubBehavior::Panic);
        let result = supervise(adapter, "q".into(), fast_config()).await;
        assert!(result.products.is_empty());
        let message = result.message.expect("panic should carry a message");
        assert!(message.starts_with("unexpected error:"), "got: {message}");
    }
}
