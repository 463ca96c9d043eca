use crate::api::ErrorResponse;
use axum::{http::StatusCode, response::IntoResponse, Json};
use ecolife_core::climatiq::{map_product, suggest_alternatives, ClimatiqClient};
use ecolife_core::ClimatiqError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClimatiqEstimateRequest {
    /// Product to price via the built-in selector mapping.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Full Climatiq estimate payload, passed through as-is.
    #[serde(default)]
    pub custom_payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClimatiqEstimateResponse {
    pub co2e: Option<f64>,
    pub co2e_unit: String,
    #[serde(rename = "isEcoFriendly")]
    pub is_eco_friendly: Option<bool>,
    pub alternatives: Vec<String>,
    pub raw: serde_json::Value,
}

/// Proxy an emissions estimate to Climatiq.
///
/// The request names a known product or carries a full custom payload.
/// Upstream failures propagate their status and message to the caller;
/// there is no fallback estimate on this path.
#[utoipa::path(
    post,
    path = "/api/climatiq-estimate",
    tag = "carbon",
    request_body(content = ClimatiqEstimateRequest, example = json!({"productName": "electric car"})),
    responses(
        (status = 200, description = "Reshaped Climatiq estimate", body = ClimatiqEstimateResponse),
        (status = 400, description = "Unsupported product or missing payload", body = ErrorResponse),
        (status = 500, description = "Missing upstream credential or server error", body = ErrorResponse)
    )
)]
pub async fn climatiq_estimate(
    Json(request): Json<ClimatiqEstimateRequest>,
) -> impl IntoResponse {
    let client = match ClimatiqClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Climatiq client unavailable: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Missing CLIMATIQ_API_KEY".to_string(),
                }),
            )
                .into_response();
        }
    };

    let product_name = request.product_name.as_deref().unwrap_or("").trim().to_lowercase();

    let outcome = if let Some(payload) = request.custom_payload {
        client.estimate_raw(payload).await
    } else if let Some(mapped) = map_product(&product_name) {
        client.estimate(&mapped).await
    } else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Unsupported productName or missing payload".to_string(),
            }),
        )
            .into_response();
    };

    match outcome {
        Ok(estimate) => {
            let alternatives = if product_name.is_empty() {
                Vec::new()
            } else {
                suggest_alternatives(&product_name)
            };

            (
                StatusCode::OK,
                Json(ClimatiqEstimateResponse {
                    co2e: estimate.co2e,
                    co2e_unit: estimate.co2e_unit,
                    is_eco_friendly: estimate
                        .co2e
                        .map(|v| v < carbon_data::ECO_FRIENDLY_THRESHOLD),
                    alternatives,
                    raw: estimate.raw,
                }),
            )
                .into_response()
        }
        Err(ClimatiqError::Upstream {
            status,
            message,
            details,
        }) => {
            tracing::warn!(status = status, "Climatiq estimate failed: {}", message);
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(serde_json::json!({ "error": message, "details": details })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Climatiq request error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Server error: {e}"),
                }),
            )
                .into_response()
        }
    }
}
