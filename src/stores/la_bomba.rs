//! Farmacia La Bomba store front — pharmacy chain at farmacialabomba.com.
//!
//! Searches `https://www.farmacialabomba.com/busqueda?f=...`. The listing
//! markup is the same storefront family as Fischel: shadowed product cards
//! with `i.v.a.i`-suffixed prices and site-relative detail links.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::store::StoreAdapter;
use crate::types::{FIELD_NOT_FOUND, Product, Store};
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

const BASE_URL: &str = "https://www.farmacialabomba.com";

/// Farmacia La Bomba listing scraper.
pub struct LaBombaStore;

impl LaBombaStore {
    /// Resolve a card's href against the store base URL.
    fn absolutize(href: &str) -> Option<String> {
        let base = Url::parse(BASE_URL).ok()?;
        base.join(href).ok().map(String::from)
    }

    /// Strip the `i.v.a.i` tax marker La Bomba appends to listing prices.
    fn clean_price(raw: &str) -> String {
        raw.replace("i.v.a.i", "").trim().to_string()
    }
}

#[async_trait]
impl StoreAdapter for LaBombaStore {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<Product>, SearchError> {
        tracing::trace!(query, "La Bomba search");

        http::request_jitter(config).await;
        let client = http::build_client(config)?;

        let response = client
            .get("https://www.farmacialabomba.com/busqueda")
            .query(&[("f", query)])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "es-CR,es;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(format!("La Bomba listing page timed out: {e}"))
                } else {
                    SearchError::Http(format!("La Bomba request failed: {e}"))
                }
            })?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("La Bomba HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("La Bomba response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "La Bomba response received");

        parse_la_bomba_html(&html, config.max_results)
    }

    fn store(&self) -> Store {
        Store::LaBomba
    }
}

/// Parse a La Bomba search results page into product listings.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_la_bomba_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<Product>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("div.card-costum-shadow")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let name_sel = Selector::parse("h3.title-card-product")
        .map_err(|e| SearchError::Parse(format!("invalid name selector: {e:?}")))?;
    let price_sel = Selector::parse("span.product-price")
        .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;
    let link_sel = Selector::parse(r#"a[href^="/detalle-producto"]"#)
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
            .map(|el| LaBombaStore::clean_price(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FIELD_NOT_FOUND.to_string());

        let url = card
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .and_then(LaBombaStore::absolutize)
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

    tracing::debug!(count = products.len(), "La Bomba listing parsed");
    Ok(products)
}
