use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::habits;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use ecolife_core::aggregate::{aggregate, HabitSample, HabitStats};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayBucketResponse {
    pub date: NaiveDate,
    pub credits: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthBucketResponse {
    /// "YYYY-MM"
    pub month: String,
    pub credits: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryTotalResponse {
    pub category: String,
    pub credits: i64,
    pub co2_saved: f64,
}

/// Chart-ready aggregation of the user's habit history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HabitStatsResponse {
    pub daily: Vec<DayBucketResponse>,
    pub monthly: Vec<MonthBucketResponse>,
    pub categories: Vec<CategoryTotalResponse>,
}

impl From<HabitStats> for HabitStatsResponse {
    fn from(stats: HabitStats) -> Self {
        Self {
            daily: stats
                .daily
                .into_iter()
                .map(|b| DayBucketResponse {
                    date: b.date,
                    credits: b.credits,
                    co2_saved: b.co2_saved,
                })
                .collect(),
            monthly: stats
                .monthly
                .into_iter()
                .map(|b| MonthBucketResponse {
                    month: b.month,
                    credits: b.credits,
                    co2_saved: b.co2_saved,
                })
                .collect(),
            categories: stats
                .categories
                .into_iter()
                .map(|c| CategoryTotalResponse {
                    category: c.category,
                    credits: c.credits,
                    co2_saved: c.co2_saved,
                })
                .collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/habits/stats",
    tag = "habits",
    responses(
        (status = 200, description = "Day, month, and category buckets for charting", body = HabitStatsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn habit_stats(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<(String, i32, f64, DateTime<Utc>)> = match habits::table
        .filter(habits::user_id.eq(user.id))
        .order(habits::logged_at.asc())
        .select((
            habits::category,
            habits::green_credits,
            habits::co2_saved,
            habits::logged_at,
        ))
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch habit stats".to_string(),
                }),
            )
                .into_response()
        }
    };

    let samples: Vec<HabitSample> = rows
        .into_iter()
        .map(|(category, green_credits, co2_saved, logged_at)| HabitSample {
            category,
            green_credits,
            co2_saved,
            logged_at,
        })
        .collect();

    (
        StatusCode::OK,
        Json(HabitStatsResponse::from(aggregate(&samples))),
    )
        .into_response()
}
