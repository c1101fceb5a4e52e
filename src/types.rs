//! Core types for product listings and store identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel value for a listing field whose selector matched nothing.
pub(crate) const FIELD_NOT_FOUND: &str = "not found";

/// A single product listing extracted from a store front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product description as shown on the listing card.
    pub description: String,
    /// Price exactly as the store renders it. No currency or number
    /// normalisation is applied.
    pub price: String,
    /// Absolute product URL, or `"not found"` if extraction failed.
    pub url: String,
}

/// The outcome of querying one store: its listings, or a message
/// explaining why there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreResult {
    /// Human-readable store name.
    pub store: String,
    /// Extracted product listings, in page order.
    pub products: Vec<Product>,
    /// Set exactly when `products` is empty: a benign "no products found"
    /// or a handled failure description.
    pub message: Option<String>,
}

impl StoreResult {
    /// Result slot for a store whose fetch completed with `products`.
    pub fn from_products(store: Store, products: Vec<Product>) -> Self {
        let message = if products.is_empty() {
            Some("no products found".to_string())
        } else {
            None
        };
        Self {
            store: store.name().to_string(),
            products,
            message,
        }
    }

    /// Result slot for a store whose fetch failed. `products` is empty.
    pub fn failed(store: Store, message: impl Into<String>) -> Self {
        Self {
            store: store.name().to_string(),
            products: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Store fronts that medion-search can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Store {
    /// Walmart Costa Rica — VTEX storefront, groceries and pharmacy.
    Walmart,
    /// Farmacia Fischel — national pharmacy chain, fischelenlinea.com.
    Fischel,
    /// Farmacia La Bomba — pharmacy chain, farmacialabomba.com.
    LaBomba,
    /// Farmacia Sucre — Magento storefront at sucreenlinea.com.
    Sucre,
}

impl Store {
    /// Returns the human-readable name of this store.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Walmart => "Walmart",
            Self::Fischel => "Fischel",
            Self::LaBomba => "La Bomba",
            Self::Sucre => "Sucre",
        }
    }

    /// Returns all available store variants in canonical order.
    ///
    /// This is the default fan-out order: result slots come back in this
    /// order when searching with [`crate::SearchConfig::default()`].
    pub fn all() -> &'static [Store] {
        &[Self::Walmart, Self::Fischel, Self::LaBomba, Self::Sucre]
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
