//! Fan-out/fan-in search orchestrator.
//!
//! Launches one supervised task per registered store adapter, waits for
//! all of them, and reassembles the per-store results in registry order.
//! A store that fails, hangs, or panics degrades to an empty slot with a
//! message; it never removes the slot or aborts the batch.

pub mod supervisor;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::registry::StoreRegistry;
use crate::types::StoreResult;
use futures::future::join_all;
use std::sync::Arc;

/// Query every registered store concurrently and collect one
/// [`StoreResult`] per registry slot, in registry order.
///
/// The total wall-clock time is bounded by the per-store budget, not the
/// sum across stores: all supervised tasks start together and are awaited
/// together.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the registry is empty. Individual
/// store failures never surface here; they arrive as empty slots with a
/// message.
pub async fn run(
    query: &str,
    registry: &StoreRegistry,
    config: &SearchConfig,
) -> Result<Vec<StoreResult>> {
    if registry.is_empty() {
        return Err(SearchError::Config("store registry is empty".into()));
    }

    tracing::debug!(query, stores = registry.len(), "dispatching store searches");

    let supervisors = registry
        .adapters()
        .iter()
        .map(|adapter| supervisor::supervise(Arc::clone(adapter), query.to_owned(), config.clone()));

    // join_all yields results in input order, so completion order never
    // leaks into slot order.
    let results = join_all(supervisors).await;

    let found: usize = results.iter().map(|r| r.products.len()).sum();
    tracing::debug!(
        stores = results.len(),
        products = found,
        "store searches completed"
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreAdapter;
    use crate::types::{Product, Store};
    use async_trait::async_trait;
    use std::time::Duration;

    struct StubAdapter {
        store: Store,
        delay: Duration,
        products: usize,
    }

    #[async_trait]
    impl StoreAdapter for StubAdapter {
        async fn fetch(
            &self,
            query: &str,
            _config: &SearchConfig,
        ) -> crate::Result<Vec<Product>> {
            tokio::time::sleep(self.delay).await;
            Ok((0..self.products)
                .map(|i| Product {
                    description: format!("{query} match {i}"),
                    price: "₡999".into(),
                    url: format!("https://example.com/{i}"),
                })
                .collect())
        }

        fn store(&self) -> Store {
            self.store
        }
    }

    fn stub(store: Store, delay_ms: u64, products: usize) -> Arc<dyn StoreAdapter> {
        Arc::new(StubAdapter {
            store,
            delay: Duration::from_millis(delay_ms),
            products,
        })
    }

    fn fast_config() -> SearchConfig {
        SearchConfig {
            store_timeout_seconds: 2,
            request_timeout_seconds: 2,
            request_delay_ms: (0, 0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_registry_is_a_config_error() {
        let registry = StoreRegistry::new(vec![]);
        let result = run("q", &registry, &fast_config()).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("registry is empty"));
    }

    #[tokio::test]
    async fn one_slot_per_adapter() {
        let registry = StoreRegistry::new(vec![
            stub(Store::Walmart, 0, 2),
            stub(Store::Fischel, 0, 0),
            stub(Store::Sucre, 0, 1),
        ]);
        let results = run("q", &registry, &fast_config()).await.expect("run");
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn slots_follow_registry_order_not_completion_order() {
        // The first registered store is the slowest; it must still occupy
        // the first slot.
        let registry = StoreRegistry::new(vec![
            stub(Store::Sucre, 200, 1),
            stub(Store::LaBomba, 50, 1),
            stub(Store::Walmart, 0, 1),
        ]);
        let results = run("q", &registry, &fast_config()).await.expect("run");
        let names: Vec<&str> = results.iter().map(|r| r.store.as_str()).collect();
        assert_eq!(names, vec!["Sucre", "La Bomba", "Walmart"]);
    }

    #[tokio::test]
    async fn stores_run_concurrently_not_sequentially() {
        let registry = StoreRegistry::new(vec![
            stub(Store::Walmart, 300, 1),
            stub(Store::Fischel, 300, 1),
            stub(Store::Sucre, 300, 1),
        ]);
        let started = std::time::Instant::now();
        let results = run("q", &registry, &fast_config()).await.expect("run");
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 3);
        // Three 300ms stores in parallel finish well under the 900ms a
        // sequential run would need.
        assert!(
            elapsed < Duration::from_millis(700),
            "batch took {elapsed:?}, expected parallel execution"
        );
    }

    #[tokio::test]
    async fn query_reaches_every_adapter() {
        let registry = StoreRegistry::new(vec![stub(Store::Walmart, 0, 1)]);
        let results = run("ibuprofeno", &registry, &fast_config())
            .await
            .expect("run");
        assert!(results[0].products[0].description.contains("ibuprofeno"));
    }
}
