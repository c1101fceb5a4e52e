//! Immutable, ordered registry of store adapters.
//!
//! The registry fixes the fan-out cardinality and the order of result
//! slots: the orchestrator reassembles per-store results in registry
//! order, regardless of which store finishes first. It is constructed
//! once and passed explicitly into the orchestrator, so tests can inject
//! stub adapters.

use crate::store::StoreAdapter;
use crate::stores::{FischelStore, LaBombaStore, SucreStore, WalmartStore};
use crate::types::Store;
use std::fmt;
use std::sync::Arc;

/// An ordered, read-only collection of store adapters.
pub struct StoreRegistry {
    adapters: Vec<Arc<dyn StoreAdapter>>,
}

impl StoreRegistry {
    /// Build a registry from an explicit adapter list.
    ///
    /// The given order is the order of result slots in the aggregate.
    pub fn new(adapters: Vec<Arc<dyn StoreAdapter>>) -> Self {
        Self { adapters }
    }

    /// Build a registry of built-in scrapers for the given stores, in the
    /// given order.
    pub fn from_stores(stores: &[Store]) -> Self {
        let adapters = stores
            .iter()
            .map(|store| -> Arc<dyn StoreAdapter> {
                match store {
                    Store::Walmart => Arc::new(WalmartStore),
                    Store::Fischel => Arc::new(FischelStore),
                    Store::LaBomba => Arc::new(LaBombaStore),
                    Store::Sucre => Arc::new(SucreStore),
                }
            })
            .collect();
        Self { adapters }
    }

    /// The registered adapters, in slot order.
    pub fn adapters(&self) -> &[Arc<dyn StoreAdapter>] {
        &self.adapters
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns `true` if no adapters are registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Store names in slot order.
    pub fn store_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.store().name()).collect()
    }
}

impl fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("stores", &self.store_names())
            .finish()
    }
}
