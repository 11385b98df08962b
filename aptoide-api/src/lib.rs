//! # Aptoide Scraper API
//!
//! HTTP front end for [`aptoide_scraper`]: one scraping endpoint plus service
//! information, health and OpenAPI documentation.
//!
//! Routes:
//!
//! - `GET /aptoide?package_name=<id>`: scrape one package into JSON
//! - `GET /`: service description
//! - `GET /health`: liveness
//! - `GET /docs`: Swagger UI
//! - `GET /api-docs/openapi.json`: OpenAPI document

pub mod api_docs;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::create_app;
pub use state::AppState;
