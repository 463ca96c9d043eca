use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub eco_score: i32,
    pub green_credits: i32,
    pub level: i32,
    pub total_co2_saved: f64,
    pub streak_days: i32,
    pub badges: Vec<Option<String>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub badges: &'a [Option<String>],
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub green_credits: i32,
    pub co2_saved: f64,
    pub photo_url: Option<String>,
    pub verified: bool,
    pub verification_score: Option<f64>,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::habits)]
pub struct NewHabit<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
    pub green_credits: i32,
    pub co2_saved: f64,
    pub photo_url: Option<&'a str>,
    pub verified: bool,
    pub verification_score: Option<f64>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::redemptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Redemption {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reward_id: i32,
    pub reward_title: String,
    pub credits_spent: i32,
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::redemptions)]
pub struct NewRedemption<'a> {
    pub user_id: Uuid,
    pub reward_id: i32,
    pub reward_title: &'a str,
    pub credits_spent: i32,
}
