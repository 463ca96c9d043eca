use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::catalog::{catalog, Reward};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRewardsResponse {
    pub rewards: Vec<Reward>,
}

#[utoipa::path(
    get,
    path = "/api/rewards",
    tag = "rewards",
    responses(
        (status = 200, description = "The reward catalog", body = ListRewardsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_rewards(AuthUser(_user): AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ListRewardsResponse {
            rewards: catalog().to_vec(),
        }),
    )
}
