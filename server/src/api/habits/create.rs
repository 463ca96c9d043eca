use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Habit, NewHabit};
use crate::schema::{habits, users};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use ecolife_core::progress::{self, ProgressSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Credits awarded when the caller does not say otherwise.
pub const DEFAULT_HABIT_CREDITS: i32 = 5;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogHabitRequest {
    pub name: String,
    /// Habit category tag; "custom" when absent.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub green_credits: Option<i32>,
    /// Reference to an already-uploaded photo, if any.
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub verification_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HabitResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub green_credits: i32,
    pub co2_saved: f64,
    pub photo_url: Option<String>,
    pub verified: bool,
    pub verification_score: Option<f64>,
    pub logged_at: DateTime<Utc>,
}

impl From<Habit> for HabitResponse {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id,
            name: habit.name,
            category: habit.category,
            green_credits: habit.green_credits,
            co2_saved: habit.co2_saved,
            photo_url: habit.photo_url,
            verified: habit.verified,
            verification_score: habit.verification_score,
            logged_at: habit.logged_at,
        }
    }
}

/// The user's progression after the habit was applied.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub green_credits: i32,
    pub total_co2_saved: f64,
    pub level: i32,
    pub streak_days: i32,
    pub credits_to_next_level: i32,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogHabitResponse {
    pub habit: HabitResponse,
    pub progress: ProgressResponse,
}

#[utoipa::path(
    post,
    path = "/api/habits",
    tag = "habits",
    request_body(content = LogHabitRequest, example = json!({"name": "Cycled to work", "category": "transportation", "green_credits": 10})),
    responses(
        (status = 201, description = "Habit logged", body = LogHabitResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn log_habit(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<LogHabitRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Habit name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let credits = request.green_credits.unwrap_or(DEFAULT_HABIT_CREDITS);
    if credits < 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Credits cannot be negative".to_string(),
            }),
        )
            .into_response();
    }

    let category = request.category.unwrap_or_else(|| "custom".to_string());
    let co2_saved = f64::from(credits) * progress::CO2_KG_PER_CREDIT;

    let mut conn = get_conn!(pool);

    // Insert the habit and apply credit/CO2/level/streak/badge updates in one
    // transaction. The balance increment is plain SQL arithmetic, so the
    // database serializes concurrent logs.
    let result: Result<(Habit, ProgressResponse), diesel::result::Error> =
        conn.transaction(|conn| {
            let last_logged_at: Option<DateTime<Utc>> = habits::table
                .filter(habits::user_id.eq(user.id))
                .select(diesel::dsl::max(habits::logged_at))
                .first(conn)?;

            let new_habit = NewHabit {
                user_id: user.id,
                name: request.name.trim(),
                category: &category,
                green_credits: credits,
                co2_saved,
                photo_url: request.photo_url.as_deref(),
                verified: request.verified.unwrap_or(false),
                verification_score: request.verification_score,
            };

            let habit: Habit = diesel::insert_into(habits::table)
                .values(&new_habit)
                .returning(Habit::as_returning())
                .get_result(conn)?;

            let (new_credits, new_co2): (i32, f64) = diesel::update(users::table.find(user.id))
                .set((
                    users::green_credits.eq(users::green_credits + credits),
                    users::total_co2_saved.eq(users::total_co2_saved + co2_saved),
                ))
                .returning((users::green_credits, users::total_co2_saved))
                .get_result(conn)?;

            let habits_logged: i64 = habits::table
                .filter(habits::user_id.eq(user.id))
                .count()
                .get_result(conn)?;

            let streak_days = progress::next_streak(user.streak_days, last_logged_at, habit.logged_at);
            let level = progress::level_for_credits(new_credits);
            let snapshot = ProgressSnapshot {
                green_credits: new_credits,
                total_co2_saved: new_co2,
                habits_logged,
                streak_days,
            };
            let badges: Vec<Option<String>> = progress::earned_badges(&snapshot)
                .into_iter()
                .map(|badge| Some(badge.to_string()))
                .collect();

            diesel::update(users::table.find(user.id))
                .set((
                    users::level.eq(level),
                    users::streak_days.eq(streak_days),
                    users::badges.eq(&badges),
                ))
                .execute(conn)?;

            Ok((
                habit,
                ProgressResponse {
                    green_credits: new_credits,
                    total_co2_saved: new_co2,
                    level,
                    streak_days,
                    credits_to_next_level: progress::credits_to_next_level(new_credits),
                    badges: badges.into_iter().flatten().collect(),
                },
            ))
        });

    match result {
        Ok((habit, progress)) => (
            StatusCode::CREATED,
            Json(LogHabitResponse {
                habit: habit.into(),
                progress,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to log habit: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to log habit".to_string(),
                }),
            )
                .into_response()
        }
    }
}
