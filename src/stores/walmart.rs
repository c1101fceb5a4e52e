//! Walmart Costa Rica store front — VTEX storefront with server-rendered
//! listing cards.
//!
//! Searches `https://www.walmart.co.cr/search?query=...` and extracts the
//! product summary cards from the results grid.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::store::StoreAdapter;
use crate::types::{FIELD_NOT_FOUND, Product, Store};
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

const BASE_URL: &str = "https://www.walmart.co.cr";

/// Walmart Costa Rica listing scraper.
///
/// The VTEX storefront links product cards with site-relative hrefs, so
/// extracted links are absolutized against the store's base URL.
pub struct WalmartStore;

impl WalmartStore {
    /// Resolve a card's href against the store base URL.
    ///
    /// Site-relative links (`/producto/p/`) become absolute; hrefs that are
    /// already absolute pass through unchanged.
    fn absolutize(href: &str) -> Option<String> {
        let base = Url::parse(BASE_URL).ok()?;
        base.join(href).ok().map(String::from)
    }
}

#[async_trait]
impl StoreAdapter for WalmartStore {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<Product>, SearchError> {
        tracing::trace!(query, "Walmart search");

        http::request_jitter(config).await;
        let client = http::build_client(config)?;

        let response = client
            .get("https://www.walmart.co.cr/search")
            .query(&[("query", query)])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "es-CR,es;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(format!("Walmart listing page timed out: {e}"))
                } else {
                    SearchError::Http(format!("Walmart request failed: {e}"))
                }
            })?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Walmart HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("Walmart response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Walmart response received");

        parse_walmart_html(&html, config.max_results)
    }

    fn store(&self) -> Store {
        Store::Walmart
    }
}

/// Parse a Walmart search results page into product listings.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_walmart_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<Product>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("article.vtex-product-summary-2-x-element")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let name_sel = Selector::parse("span.vtex-product-summary-2-x-productBrand")
        .map_err(|e| SearchError::Parse(format!("invalid name selector: {e:?}")))?;
    let price_sel = Selector::parse(
        "div.vtex-store-components-3-x-sellingPrice span.vtex-store-components-3-x-currencyContainer span",
    )
    .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;
    let link_sel = Selector::parse(r#"a[href*="/p/"]"#)
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;

    let mut products = Vec::new();

    for card in document.select(&card_sel) {
        let description = card
            .select(&name_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FIELD_NOT_FOUND.to_string());

        let price = card
            .select(&price_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FIELD_NOT_FOUND.to_string());

        let url = card
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .and_then(WalmartStore::absolutize)
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

    tracing::debug!(count = products.len(), "Walmart listing parsed");
    Ok(products)
}
