pub mod create;
pub mod list;
pub mod stats;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/habits endpoints (mounted at /api/habits)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_habits).post(create::log_habit))
        .route("/stats", get(stats::habit_stats))
}

#[derive(OpenApi)]
#[openapi(
    paths(create::log_habit, list::list_habits, stats::habit_stats),
    components(schemas(
        create::LogHabitRequest,
        create::LogHabitResponse,
        create::HabitResponse,
        create::ProgressResponse,
        list::ListHabitsResponse,
        list::PaginationMetadata,
        stats::HabitStatsResponse,
        stats::DayBucketResponse,
        stats::MonthBucketResponse,
        stats::CategoryTotalResponse,
    ))
)]
pub struct ApiDoc;
