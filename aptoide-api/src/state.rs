use aptoide_scraper::{AptoideClient, ListingSource, ScrapeResult, ScraperConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ListingSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }

    /// State backed by the real Aptoide client.
    pub fn from_config(config: &ScraperConfig) -> ScrapeResult<Self> {
        let client = AptoideClient::new(config.clone())?;
        Ok(Self::new(Arc::new(client)))
    }
}
