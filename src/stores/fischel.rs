//! Farmacia Fischel store front — national pharmacy chain at
//! fischelenlinea.com.
//!
//! Searches `https://www.fischelenlinea.com/busqueda?f=...`. Listing prices
//! carry a trailing `i.v.a.i` tax marker that is stripped before returning.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::store::StoreAdapter;
use crate::types::{FIELD_NOT_FOUND, Product, Store};
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

const BASE_URL: &str = "https://www.fischelenlinea.com";

/// Farmacia Fischel listing scraper.
pub struct FischelStore;

impl FischelStore {
    /// Resolve a card's href against the store base URL.
    fn absolutize(href: &str) -> Option<String> {
        let base = Url::parse(BASE_URL).ok()?;
        base.join(href).ok().map(String::from)
    }

    /// Strip the `i.v.a.i` tax marker Fischel appends to listing prices.
    fn clean_price(raw: &str) -> String {
        raw.replace("i.v.a.i", "").trim().to_string()
    }
}

#[async_trait]
impl StoreAdapter for FischelStore {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<Product>, SearchError> {
        tracing::trace!(query, "Fischel search");

        http::request_jitter(config).await;
        let client = http::build_client(config)?;

        let response = client
            .get("https://www.fischelenlinea.com/busqueda")
            .query(&[("f", query)])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "es-CR,es;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(format!("Fischel listing page timed out: {e}"))
                } else {
                    SearchError::Http(format!("Fischel request failed: {e}"))
                }
            })?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Fischel HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("Fischel response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Fischel response received");

        parse_fischel_html(&html, config.max_results)
    }

    fn store(&self) -> Store {
        Store::Fischel
    }
}

/// Parse a Fischel search results page into product listings.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_fischel_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<Product>, SearchError> {
    let document = Html::parse_document(html);

    // Fischel renders one card per product with a productId-prefixed element id
    let card_sel = Selector::parse(r#"div[id*="productId"]"#)
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
            .map(|el| FischelStore::clean_price(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FIELD_NOT_FOUND.to_string());

        let url = card
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .and_then(FischelStore::absolutize)
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

    tracing::debug!(count = products.len(), "Fischel listing parsed");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_FISCHEL_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="card" id="productId-8831">
    <a href="/detalle-producto/8831/acetaminofen-500-mg">
        <h3 class="title-card-product">Acetaminofén 500 mg x 10 tabletas</h3>
    </a>
    <span class="product-price">₡1.900 i.v.a.i</span>
</div>
<div class="card" id="productId-4410">
    <a href="/detalle-producto/4410/vitamina-c-masticable">
        <h3 class="title-card-product">Vitamina C masticable</h3>
    </a>
    <span class="product-price">₡3.450 i.v.a.i</span>
</div>
</body>
</html>"#;

    #[test]
    fn clean_price_strips_tax_marker() {
        assert_eq!(FischelStore::clean_price("₡1.900 i.v.a.i"), "₡1.900");
        assert_eq!(FischelStore::clean_price("  ₡500  "), "₡500");
    }

    #[test]
    fn absolutize_detail_href() {
        let url = FischelStore::absolutize("/detalle-producto/8831/acetaminofen-500-mg");
        assert_eq!(
            url,
            Some("https://www.fischelenlinea.com/detalle-producto/8831/acetaminofen-500-mg".to_string())
        );
    }

    #[test]
    fn parse_mock_html_returns_products() {
        let products = parse_fischel_html(MOCK_FISCHEL_HTML, 10).expect("should parse");
        assert_eq!(products.len(), 2);

        assert_eq!(products[0].description, "Acetaminofén 500 mg x 10 tabletas");
        assert_eq!(products[0].price, "₡1.900");
        assert!(products[0].url.starts_with("https://www.fischelenlinea.com/detalle-producto"));

        assert_eq!(products[1].price, "₡3.450");
    }

    #[test]
    fn parse_respects_max_results() {
        let products = parse_fischel_html(MOCK_FISCHEL_HTML, 1).expect("should parse");
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let products = parse_fischel_html("<html><body></body></html>", 10).expect("should parse");
        assert!(products.is_empty());
    }

    #[test]
    fn parse_card_without_price_uses_sentinel() {
        let html = r#"<div id="productId-1">
            <a href="/detalle-producto/1/x"><h3 class="title-card-product">Sin precio</h3></a>
        </div>"#;
        let products = parse_fischel_html(html, 10).expect("should parse");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, FIELD_NOT_FOUND);
    }

    #[test]
    fn store_is_fischel() {
        let adapter = FischelStore;
        assert_eq!(adapter.store(), Store::Fischel);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FischelStore>();
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_fischel_search() {
        let adapter = FischelStore;
        let config = SearchConfig::default();
        let products = adapter.fetch("acetaminofen", &config).await;
        assert!(products.is_ok());
    }
}
