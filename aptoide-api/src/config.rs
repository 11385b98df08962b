use aptoide_scraper::ScraperConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Source-site settings are not environment driven.
    #[serde(skip)]
    pub scraper: ScraperConfig,
}

fn default_bind_addr() -> String {
    std::env::var("APTOIDE_SCRAPER_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            scraper: ScraperConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
