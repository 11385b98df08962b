//! # Scrape Errors
//!
//! Failures that end a scrape. Field-level extraction misses are not errors;
//! they show up as `None` in [`AppMetadata`](crate::AppMetadata).
//!
//! The variants split into two families that callers must keep apart:
//!
//! - **Not found**: the package has no listing on the source site.
//! - **Transport**: the source could not be reached or misbehaved
//!   ([`ScrapeError::Timeout`], [`ScrapeError::Unreachable`],
//!   [`ScrapeError::Upstream`]).

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("{0}")]
    NotFound(String),

    #[error("Request timeout while {0}")]
    Timeout(String),

    #[error("Unable to connect to Aptoide while {0}")]
    Unreachable(String),

    #[error("Aptoide returned an error while {0}")]
    Upstream(String),

    #[error("Internal scraper error: {0}")]
    Internal(String),
}

impl ScrapeError {
    /// True for the errors that mean "source unreachable or erroring".
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScrapeError::Timeout(_) | ScrapeError::Unreachable(_) | ScrapeError::Upstream(_)
        )
    }

    /// Classify a `reqwest` failure that happened during `action`
    /// (e.g. "fetching app page").
    pub(crate) fn from_reqwest(err: reqwest::Error, action: &str) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout(action.to_string())
        } else if err.is_connect() {
            ScrapeError::Unreachable(format!("{action}: {err}"))
        } else if err.is_decode() || err.is_body() {
            ScrapeError::Upstream(format!("{action}: {err}"))
        } else if err.is_builder() {
            ScrapeError::Internal(format!("{action}: {err}"))
        } else {
            ScrapeError::Unreachable(format!("{action}: {err}"))
        }
    }

    /// Map a non-success HTTP status. Client errors mean the package does not
    /// exist on the source; anything else is a transport failure.
    pub(crate) fn from_status(status: StatusCode, action: &str, not_found: String) -> Self {
        if status.is_client_error() {
            ScrapeError::NotFound(not_found)
        } else {
            ScrapeError::Upstream(format!("{action}: HTTP {}", status.as_u16()))
        }
    }
}

/// Convenient result type for scraping operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;
