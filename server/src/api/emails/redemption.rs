use crate::api::ErrorResponse;
use axum::{http::StatusCode, response::IntoResponse, Json};
use ecolife_core::mail::{Mailer, RedemptionEmail};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RewardPayload {
    pub title: String,
    pub credits: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendRedemptionEmailRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub reward: Option<RewardPayload>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SendRedemptionEmailResponse {
    pub ok: bool,
}

/// Send a reward-redemption confirmation email.
#[utoipa::path(
    post,
    path = "/sendRedemptionEmail",
    tag = "emails",
    request_body = SendRedemptionEmailRequest,
    responses(
        (status = 200, description = "Email dispatched", body = SendRedemptionEmailResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Email not configured or dispatch failed", body = ErrorResponse)
    )
)]
pub async fn send_redemption_email(
    Json(request): Json<SendRedemptionEmailRequest>,
) -> impl IntoResponse {
    let email = request.email.as_deref().unwrap_or("");
    let (title, credits) = match request.reward.as_ref() {
        Some(reward) => (reward.title.as_str(), reward.credits),
        None => ("", 0),
    };

    if email.is_empty() || title.is_empty() || credits == 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid payload".to_string(),
            }),
        )
            .into_response();
    }

    let mailer = match Mailer::from_env() {
        Ok(m) => m,
        Err(e) => {
            tracing::error!("Mailer unavailable: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Email not configured".to_string(),
                }),
            )
                .into_response();
        }
    };

    let user_id = request.user_id.unwrap_or_default();
    let outcome = mailer
        .send_redemption(&RedemptionEmail {
            to: email,
            reward_title: title,
            credits,
            user_id: &user_id,
        })
        .await;

    match outcome {
        Ok(()) => (
            StatusCode::OK,
            Json(SendRedemptionEmailResponse { ok: true }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("sendRedemptionEmail error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to send email".to_string(),
                }),
            )
                .into_response()
        }
    }
}
