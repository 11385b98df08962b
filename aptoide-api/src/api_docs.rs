use crate::error::ApiErrorResponse;
use aptoide_scraper::AppMetadata;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aptoide Scraper API",
        description = "REST API to scrape package metadata from Aptoide app store"
    ),
    paths(
        crate::routes::health::root,
        crate::routes::health::health_check,
        crate::routes::scrape::scrape_package,
    ),
    components(schemas(AppMetadata, ApiErrorResponse)),
    tags(
        (name = "scraper", description = "Aptoide listing scraper"),
        (name = "service", description = "Service information")
    )
)]
pub struct ApiDoc;
