//! # Listing Page Fetching
//!
//! Resolves a package id to its Aptoide listing page and downloads it.
//!
//! Resolution goes through the search API: the first hit whose `package`
//! equals the requested id decides the page URL (its `uname`, else its store,
//! else a slug derived from the id). One attempt per call, no retries.
//!
//! Outcomes:
//!
//! * `Ok(html)` - the page text
//! * [`ScrapeError::NotFound`] - no exact search hit, a 4xx, or a page that is
//!   not a listing
//! * [`ScrapeError::Timeout`] / [`ScrapeError::Unreachable`] /
//!   [`ScrapeError::Upstream`] - the source could not be used

use crate::config::ScraperConfig;
use crate::error::{ScrapeError, ScrapeResult};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const SEARCH_ACCEPT: &str = "application/json";
const LANGUAGE: &str = "en-US,en;q=0.5";

/// Anything that can produce the raw listing page for a package id.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listing(&self, package: &str) -> ScrapeResult<String>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    datalist: Option<SearchDatalist>,
}

#[derive(Debug, Deserialize)]
struct SearchDatalist {
    #[serde(default)]
    list: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchHit {
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    uname: Option<String>,
    #[serde(default)]
    store: Option<SearchStore>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchStore {
    #[serde(default)]
    name: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Pick the listing URL for `package` from a set of search hits.
fn listing_url(config: &ScraperConfig, hits: &[SearchHit], package: &str) -> Option<String> {
    let hit = hits
        .iter()
        .find(|hit| hit.package.as_deref() == Some(package))?;

    if let Some(uname) = non_empty(&hit.uname) {
        return Some(config.app_page_url(uname));
    }
    if let Some(store) = hit.store.as_ref().and_then(|s| non_empty(&s.name)) {
        return Some(config.store_page_url(store, package));
    }
    Some(config.app_page_url(&package.replace('.', "-")))
}

/// A body counts as a listing page when it has a heading or the package
/// details block.
pub fn looks_like_listing(html: &str) -> bool {
    html.contains("Package ID") || html.to_ascii_lowercase().contains("<h1")
}

/// HTTP client for the Aptoide search API and listing pages.
pub struct AptoideClient {
    client: Client,
    config: ScraperConfig,
}

impl AptoideClient {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Internal`] if the HTTP client cannot be built.
    pub fn new(config: ScraperConfig) -> ScrapeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ScrapeError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Look the package up through the search API and return its page URL.
    pub async fn resolve_listing_url(&self, package: &str) -> ScrapeResult<String> {
        let action = "searching Aptoide";
        let limit = self.config.search_limit.to_string();
        let url = Url::parse_with_params(
            &self.config.search_url,
            &[("query", package), ("limit", limit.as_str())],
        )
        .map_err(|e| ScrapeError::Internal(format!("Invalid search URL: {e}")))?;
        debug!(url = %url, "Searching Aptoide");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, SEARCH_ACCEPT)
            .header(ACCEPT_LANGUAGE, LANGUAGE)
            .send()
            .await
            .map_err(|e| ScrapeError::from_reqwest(e, action))?;

        let status = response.status();
        if !status.is_success() {
            warn!(package = %package, status = status.as_u16(), "Search API returned an error");
            return Err(ScrapeError::from_status(
                status,
                action,
                not_found_message(package),
            ));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                ScrapeError::Upstream(format!("{action}: invalid JSON: {e}"))
            } else {
                ScrapeError::from_reqwest(e, action)
            }
        })?;
        let hits = parsed.datalist.map(|d| d.list).unwrap_or_default();

        match listing_url(&self.config, &hits, package) {
            Some(url) => {
                info!(package = %package, url = %url, "Found app listing");
                Ok(url)
            }
            None => {
                info!(package = %package, hits = hits.len(), "No exact search match");
                Err(ScrapeError::NotFound(not_found_message(package)))
            }
        }
    }

    /// Download a listing page, following redirects.
    pub async fn fetch_page(&self, url: &str) -> ScrapeResult<String> {
        let action = "fetching app page";
        debug!(url = %url, "Fetching app page");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, PAGE_ACCEPT)
            .header(ACCEPT_LANGUAGE, LANGUAGE)
            .send()
            .await
            .map_err(|e| ScrapeError::from_reqwest(e, action))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "App page returned an error");
            return Err(ScrapeError::from_status(
                status,
                action,
                format!("App page not found at {url}"),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ScrapeError::from_reqwest(e, action))?;

        if !looks_like_listing(&html) {
            warn!(url = %url, bytes = html.len(), "Page does not look like an app listing");
            return Err(ScrapeError::NotFound(format!(
                "No app listing found at {url}"
            )));
        }

        debug!(url = %url, bytes = html.len(), "Fetched app page");
        Ok(html)
    }
}

#[async_trait]
impl ListingSource for AptoideClient {
    async fn fetch_listing(&self, package: &str) -> ScrapeResult<String> {
        let url = self.resolve_listing_url(package).await?;
        self.fetch_page(&url).await
    }
}

fn not_found_message(package: &str) -> String {
    format!(
        "Package '{package}' not found on Aptoide. Make sure the package name is correct."
    )
}
