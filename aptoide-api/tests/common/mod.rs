//! Shared helpers for aptoide-api tests: a scripted listing source and
//! router/test-server constructors.

#![allow(dead_code)]

use aptoide_api::{create_app, AppState};
use aptoide_scraper::{ListingSource, ScrapeError, ScrapeResult};
use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const WHATSAPP_PAGE: &str =
    include_str!("../../../aptoide-scraper/tests/fixtures/whatsapp.html");

/// Listing source with canned outcomes per package id. Counts every call so
/// tests can check that rejected requests never reach it.
#[derive(Default)]
pub struct FakeSource {
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingSource for FakeSource {
    async fn fetch_listing(&self, package: &str) -> ScrapeResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match package {
            "com.whatsapp" => Ok(WHATSAPP_PAGE.to_string()),
            "com.partial" => Ok("<h1 class=\"app-name\">Partial App</h1>".to_string()),
            "com.slow" => Err(ScrapeError::Timeout("fetching app page".to_string())),
            "com.down" => Err(ScrapeError::Unreachable(
                "searching Aptoide: connection refused".to_string(),
            )),
            "com.broken" => Err(ScrapeError::Upstream(
                "fetching app page: HTTP 503".to_string(),
            )),
            other => Err(ScrapeError::NotFound(format!(
                "Package '{other}' not found on Aptoide. Make sure the package name is correct."
            ))),
        }
    }
}

/// Router wired to a fresh [`FakeSource`].
pub fn create_test_app() -> (Router, Arc<FakeSource>) {
    let source = Arc::new(FakeSource::default());
    let app = create_app(AppState::new(source.clone()));
    (app, source)
}

pub fn create_test_server() -> (TestServer, Arc<FakeSource>) {
    let (app, source) = create_test_app();
    (
        TestServer::new(app).expect("Failed to create test server"),
        source,
    )
}

/// Helper to extract JSON body from axum response
pub async fn extract_json_body<T>(response: axum::response::Response) -> T
where
    T: serde::de::DeserializeOwned,
{
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&body).expect("Failed to deserialize JSON")
}
