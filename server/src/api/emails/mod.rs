pub mod redemption;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the standalone email-dispatch endpoint. The
/// reward redemption flow sends the same email itself; this route exists
/// for callers that manage redemption state elsewhere.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/sendRedemptionEmail",
        post(redemption::send_redemption_email),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(redemption::send_redemption_email),
    components(schemas(
        redemption::SendRedemptionEmailRequest,
        redemption::RewardPayload,
        redemption::SendRedemptionEmailResponse,
    ))
)]
pub struct ApiDoc;
