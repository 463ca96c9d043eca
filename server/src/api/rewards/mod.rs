pub mod catalog;
pub mod list;
pub mod redeem;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/rewards endpoints (mounted at /api/rewards)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_rewards))
        .route("/{id}/redeem", post(redeem::redeem_reward))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_rewards, redeem::redeem_reward),
    components(schemas(
        catalog::Reward,
        list::ListRewardsResponse,
        redeem::RedeemResponse,
    ))
)]
pub struct ApiDoc;
