use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::get::ProfileResponse;

/// Merge-update of the caller-editable profile fields. Progression fields
/// (credits, level, badges, streak) are server-managed and not accepted here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
struct ProfileChanges<'a> {
    display_name: Option<&'a str>,
    email: Option<&'a str>,
    photo_url: Option<&'a str>,
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if request.display_name.is_none() && request.email.is_none() && request.photo_url.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Nothing to update".to_string(),
            }),
        )
            .into_response();
    }

    if let Some(email) = request.email.as_deref() {
        if !email.contains('@') {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid email address".to_string(),
                }),
            )
                .into_response();
        }
    }

    let mut conn = get_conn!(pool);

    let changes = ProfileChanges {
        display_name: request.display_name.as_deref(),
        email: request.email.as_deref(),
        photo_url: request.photo_url.as_deref(),
    };

    let updated: User = match diesel::update(users::table.find(user.id))
        .set(&changes)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        Err(e) => {
            tracing::error!("Failed to update profile: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update profile".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(ProfileResponse::from(updated))).into_response()
}
