pub mod estimate;
pub mod search;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the public carbon endpoints: the instant local
/// lookup and the Climatiq estimate proxy.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/carbon/search", post(search::search_carbon))
        .route("/api/climatiq-estimate", post(estimate::climatiq_estimate))
}

#[derive(OpenApi)]
#[openapi(
    paths(search::search_carbon, estimate::climatiq_estimate),
    components(schemas(
        search::CarbonSearchRequest,
        search::CarbonSearchResponse,
        estimate::ClimatiqEstimateRequest,
        estimate::ClimatiqEstimateResponse,
    ))
)]
pub struct ApiDoc;
