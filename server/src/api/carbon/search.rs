use axum::{http::StatusCode, response::IntoResponse, Json};
use carbon_data::LookupResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CarbonSearchRequest {
    pub query: String,
}

/// Wire form of a lookup result. Field names match what the dashboard's
/// analyzer widget consumes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarbonSearchResponse {
    pub found: bool,
    pub product: String,
    pub co2e: f64,
    pub unit: String,
    pub category: String,
    pub is_eco_friendly: bool,
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<LookupResult> for CarbonSearchResponse {
    fn from(result: LookupResult) -> Self {
        Self {
            found: result.found,
            product: result.product,
            co2e: result.co2e,
            unit: result.unit,
            category: result.category,
            is_eco_friendly: result.is_eco_friendly,
            alternatives: result.alternatives,
            message: result.message,
        }
    }
}

/// Look up a product's carbon footprint in the embedded table.
///
/// A query with no match is still a 200: the response carries
/// `found = false` and a guidance message instead of an error.
#[utoipa::path(
    post,
    path = "/api/carbon/search",
    tag = "carbon",
    request_body(content = CarbonSearchRequest, example = json!({"query": "plastic bottle"})),
    responses(
        (status = 200, description = "Lookup result (not-found is a normal outcome)", body = CarbonSearchResponse)
    )
)]
pub async fn search_carbon(Json(request): Json<CarbonSearchRequest>) -> impl IntoResponse {
    let result = carbon_data::search(&request.query);
    (StatusCode::OK, Json(CarbonSearchResponse::from(result)))
}
