//! Farmacia Sucre store front — Magento storefront at sucreenlinea.com.
//!
//! Searches `https://sucreenlinea.com/catalogsearch/result/?q=...`. Magento
//! renders absolute product links, so no URL resolution is needed; the
//! description and link come from the same anchor element.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::store::StoreAdapter;
use crate::types::{FIELD_NOT_FOUND, Product, Store};
use async_trait::async_trait;
use scraper::{Html, Selector};

/// Farmacia Sucre listing scraper.
pub struct SucreStore;

#[async_trait]
impl StoreAdapter for SucreStore {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<Product>, SearchError> {
        tracing::trace!(query, "Sucre search");

        http::request_jitter(config).await;
        let client = http::build_client(config)?;

        let response = client
            .get("https://sucreenlinea.com/catalogsearch/result/")
            .query(&[("q", query)])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "es-CR,es;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(format!("Sucre listing page timed out: {e}"))
                } else {
                    SearchError::Http(format!("Sucre request failed: {e}"))
                }
            })?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Sucre HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("Sucre response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Sucre response received");

        parse_sucre_html(&html, config.max_results)
    }

    fn store(&self) -> Store {
        Store::Sucre
    }
}

/// Parse a Sucre search results page into product listings.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_sucre_html(html: &str, max_results: usize) -> Result<Vec<Product>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("div.product.details.product-item-details")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let link_sel = Selector::parse("a.product-item-link")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let price_sel = Selector::parse("span.price")
        .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;

    let mut products = Vec::new();

    for card in document.select(&card_sel) {
        let link_el = card.select(&link_sel).next();

        let description = link_el
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FIELD_NOT_FOUND.to_string());

        let url = link_el
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string)
            .unwrap_or_else(|| FIELD_NOT_FOUND.to_string());

        let price = card
            .select(&price_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FIELD_NOT_FOUND.to_string());

        products.push(Product {
            description,
            price,
            url,
        });

        if products.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = products.len(), "Sucre listing parsed");
    Ok(products)
}
