pub mod health;
pub mod scrape;

use crate::{api_docs::ApiDoc, state::AppState};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the service router. Swagger UI is served at `/docs` and the raw
/// OpenAPI document at `/api-docs/openapi.json`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health::routes())
        .merge(scrape::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
