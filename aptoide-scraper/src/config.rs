use std::time::Duration;

/// Connection settings for the Aptoide source site.
///
/// Listing URLs are built from two templates:
///
/// * `app_page_template` - `{slug}` is replaced by the app's `uname` (or the
///   package id with dots turned into dashes)
/// * `store_page_template` - `{store}` and `{package}` are replaced by the
///   store name and package id
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use aptoide_scraper::ScraperConfig;
///
/// let config = ScraperConfig {
///     timeout: Duration::from_secs(5),
///     ..ScraperConfig::default()
/// };
/// assert_eq!(config.search_limit, 10);
/// ```
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Search API used to resolve a package id to its listing page
    pub search_url: String,
    pub app_page_template: String,
    pub store_page_template: String,
    /// Number of search hits requested per lookup
    pub search_limit: u32,
    /// Bound on each outbound request, body included
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: "https://ws2-cache.aptoide.com/api/7/apps/search".to_string(),
            app_page_template: "https://{slug}.en.aptoide.com/app".to_string(),
            store_page_template: "https://{store}.en.aptoide.com/{package}".to_string(),
            search_limit: 10,
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn app_page_url(&self, slug: &str) -> String {
        self.app_page_template.replace("{slug}", slug)
    }

    pub fn store_page_url(&self, store: &str, package: &str) -> String {
        self.store_page_template
            .replace("{store}", store)
            .replace("{package}", package)
    }
}
