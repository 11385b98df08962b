//! # Aptoide Scraper
//!
//! Fetches an app's public listing page from Aptoide and pulls a fixed set
//! of metadata fields out of the markup.
//!
//! ## Components
//!
//! - [`fetch`]: resolves a package id to its listing page and downloads it
//! - [`extract`]: independent per-field extractors over the page
//! - [`scrape_package`]: fetch then extract, the only pipeline
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aptoide_scraper::{scrape_package, AptoideClient, ScraperConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AptoideClient::new(ScraperConfig::default())?;
//! let metadata = scrape_package(&client, "com.whatsapp").await?;
//! println!("{:?}", metadata.name);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod model;

pub use config::ScraperConfig;
pub use error::{ScrapeError, ScrapeResult};
pub use extract::extract;
pub use fetch::{AptoideClient, ListingSource};
pub use model::AppMetadata;

use tracing::{debug, info, warn};

/// Fetch the listing page for `package` and extract its metadata.
///
/// The returned record always reports the requested package id. Fetch
/// failures are returned as-is and the extractor is not run.
pub async fn scrape_package<S>(source: &S, package: &str) -> ScrapeResult<AppMetadata>
where
    S: ListingSource + ?Sized,
{
    info!(package = %package, "Scraping package");

    let page = source.fetch_listing(package).await?;
    let metadata = extract(&page);

    if let Some(found) = metadata.package_id.as_deref() {
        if found != package {
            warn!(requested = %package, found = %found, "Listing reports a different package id");
        }
    }
    debug!(
        package = %package,
        fields = metadata.populated_count(),
        "Extracted listing metadata"
    );

    Ok(metadata.with_package_id(package))
}
