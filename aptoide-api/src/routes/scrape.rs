use crate::{error::ApiResult, state::AppState, validation::validate_package_name};
use aptoide_scraper::AppMetadata;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

pub fn routes() -> Router<AppState> {
    Router::new().route("/aptoide", get(scrape_package))
}

/// The parameter is optional here so a missing value goes through the same
/// validation path (and JSON error body) as an empty one.
#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub package_name: Option<String>,
}

/// Scrape package metadata from the Aptoide app store
///
/// Looks the package up on Aptoide, downloads its listing page and extracts
/// name, version, size, downloads, certificate info and more. Fields the
/// page does not provide are returned as `null`.
#[utoipa::path(
    get,
    path = "/aptoide",
    tag = "scraper",
    params(
        ("package_name" = String, Query,
            description = "Package identifier (e.g., com.facebook.katana)",
            example = "com.whatsapp")
    ),
    responses(
        (status = 200, description = "Metadata scraped from the listing page", body = AppMetadata),
        (status = 400, description = "Missing or invalid package identifier", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Package not found on Aptoide", body = crate::error::ApiErrorResponse),
        (status = 502, description = "Aptoide unreachable or returned an error", body = crate::error::ApiErrorResponse),
        (status = 504, description = "Aptoide did not answer in time", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn scrape_package(
    State(state): State<AppState>,
    Query(query): Query<ScrapeQuery>,
) -> ApiResult<Json<AppMetadata>> {
    let package = validate_package_name(query.package_name.as_deref())?;

    let metadata = aptoide_scraper::scrape_package(state.source.as_ref(), &package).await?;

    Ok(Json(metadata))
}
