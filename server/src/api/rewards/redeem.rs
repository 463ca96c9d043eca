use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewRedemption;
use crate::schema::{redemptions, users};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use ecolife_core::mail::{Mailer, RedemptionEmail};
use ecolife_core::progress;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RedeemResponse {
    pub ok: bool,
    pub reward_title: String,
    pub credits_spent: i32,
    pub remaining_credits: i32,
    pub email_sent: bool,
}

#[utoipa::path(
    post,
    path = "/api/rewards/{id}/redeem",
    tag = "rewards",
    params(
        ("id" = i32, Path, description = "Reward id from the catalog")
    ),
    responses(
        (status = 200, description = "Reward redeemed", body = RedeemResponse),
        (status = 404, description = "Unknown reward", body = ErrorResponse),
        (status = 409, description = "Not enough credits", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn redeem_reward(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let Some(reward) = catalog::find(id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Unknown reward".to_string(),
            }),
        )
            .into_response();
    };

    let mut conn = get_conn!(pool);

    // Guarded atomic decrement: the WHERE clause on the balance is the only
    // concurrency control, per the database's own serialization.
    let result: Result<Option<(i32, Uuid)>, diesel::result::Error> = conn.transaction(|conn| {
        let remaining: Option<i32> = diesel::update(
            users::table
                .filter(users::id.eq(user.id))
                .filter(users::green_credits.ge(reward.credits)),
        )
        .set(users::green_credits.eq(users::green_credits - reward.credits))
        .returning(users::green_credits)
        .get_result(conn)
        .optional()?;

        let Some(remaining) = remaining else {
            return Ok(None);
        };

        diesel::update(users::table.find(user.id))
            .set(users::level.eq(progress::level_for_credits(remaining)))
            .execute(conn)?;

        let new_redemption = NewRedemption {
            user_id: user.id,
            reward_id: reward.id,
            reward_title: &reward.title,
            credits_spent: reward.credits,
        };

        let redemption_id: Uuid = diesel::insert_into(redemptions::table)
            .values(&new_redemption)
            .returning(redemptions::id)
            .get_result(conn)?;

        Ok(Some((remaining, redemption_id)))
    });

    let (remaining_credits, redemption_id) = match result {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: "Not enough credits".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to redeem reward: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to redeem reward".to_string(),
                }),
            )
                .into_response();
        }
    };

    // The redemption is committed at this point; the confirmation email is
    // best-effort and its failure only gets logged.
    let mut email_sent = false;
    if let Some(to) = user.email.as_deref() {
        let user_id = user.id.to_string();
        match Mailer::from_env() {
            Ok(mailer) => {
                match mailer
                    .send_redemption(&RedemptionEmail {
                        to,
                        reward_title: &reward.title,
                        credits: reward.credits,
                        user_id: &user_id,
                    })
                    .await
                {
                    Ok(()) => email_sent = true,
                    Err(e) => tracing::warn!("Redemption email failed: {}", e),
                }
            }
            Err(e) => tracing::warn!("Mailer unavailable: {}", e),
        }
    }

    if email_sent {
        if let Err(e) = diesel::update(redemptions::table.find(redemption_id))
            .set(redemptions::email_sent.eq(true))
            .execute(&mut conn)
        {
            tracing::warn!("Failed to record email dispatch: {}", e);
        }
    }

    (
        StatusCode::OK,
        Json(RedeemResponse {
            ok: true,
            reward_title: reward.title.clone(),
            credits_spent: reward.credits,
            remaining_credits,
            email_sent,
        }),
    )
        .into_response()
}
