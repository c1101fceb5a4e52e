//! Shared HTTP client with User-Agent rotation for store front requests.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers,
//! cookie support, and rotating User-Agent strings, plus the per-request
//! jitter delay used to spread concurrent store requests over time.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:136.0) Gecko/20100101 Firefox/136.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:136.0) Gecko/20100101 Firefox/136.0",
];

/// Build a [`reqwest::Client`] configured for store front scraping.
///
/// The client has:
/// - Cookie store enabled (VTEX and Magento storefronts set session cookies)
/// - Request timeout from `config.request_timeout_seconds`
/// - Random User-Agent from the built-in rotation list (or custom if configured)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// Sleep for a random duration within `config.request_delay_ms`.
///
/// Each store's fetch applies its own independent jitter, so concurrent
/// requests do not hit all store fronts at the same instant. A `(0, 0)`
/// range disables the delay.
pub async fn request_jitter(config: &SearchConfig) {
    let (min, max) = config.request_delay_ms;
    if max == 0 {
        return;
    }
    let wait = {
        let mut rng = rand::thread_rng();
        rng.gen_range(min..=max)
    };
    tokio::time::sleep(Duration::from_millis(wait)).await;
}
