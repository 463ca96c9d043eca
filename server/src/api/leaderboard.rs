use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardParams {
    /// Number of entries to return (default: 10, max: 100)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub name: String,
    pub green_credits: i32,
    pub level: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// Returns the router for the leaderboard endpoint
pub fn router() -> Router<AppState> {
    Router::new().route("/api/leaderboard", get(leaderboard))
}

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "leaderboard",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Top users by green credits", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn leaderboard(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    use crate::schema::users;

    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    let mut conn = get_conn!(pool);

    let rows: Vec<(String, Option<String>, i32, i32)> = match users::table
        .filter(users::deleted_at.is_null())
        .order(users::green_credits.desc())
        .limit(limit)
        .select((
            users::username,
            users::display_name,
            users::green_credits,
            users::level,
        ))
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch leaderboard".to_string(),
                }),
            )
                .into_response()
        }
    };

    let entries = rows
        .into_iter()
        .map(|(username, display_name, green_credits, level)| LeaderboardEntry {
            name: display_name.unwrap_or(username),
            green_credits,
            level,
        })
        .collect();

    (StatusCode::OK, Json(LeaderboardResponse { entries })).into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(leaderboard),
    components(schemas(LeaderboardEntry, LeaderboardResponse))
)]
pub struct ApiDoc;
