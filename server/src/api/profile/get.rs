use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::models::User;
use axum::{http::StatusCode, response::IntoResponse, Json};
use ecolife_core::progress;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub eco_score: i32,
    pub green_credits: i32,
    pub level: i32,
    pub total_co2_saved: f64,
    pub streak_days: i32,
    pub credits_to_next_level: i32,
    pub badges: Vec<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        let credits_to_next_level = progress::credits_to_next_level(user.green_credits);
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            eco_score: user.eco_score,
            green_credits: user.green_credits,
            level: user.level,
            total_co2_saved: user.total_co2_saved,
            streak_days: user.streak_days,
            credits_to_next_level,
            badges: user.badges.into_iter().flatten().collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "The authenticated user's profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(AuthUser(user): AuthUser) -> impl IntoResponse {
    (StatusCode::OK, Json(ProfileResponse::from(user)))
}
