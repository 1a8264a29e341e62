//! Database models

use crate::utils::parse_datetime_or_now;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Optional contact address, carried into access-token claims
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&SqliteRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: parse_datetime_or_now(row.try_get("created_at")?),
            updated_at: parse_datetime_or_now(row.try_get("updated_at")?),
        })
    }
}

/// New user (for insertion)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub password_hash: String,
}

/// Refresh token record
///
/// One row backs each issued refresh token. Rows are never deleted;
/// revocation flips `valid` to false and the flag is never reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: String,
    pub user_id: String,
    pub valid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&SqliteRow> for RefreshToken {
    type Error = sqlx::Error;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        let valid: i64 = row.try_get("valid")?;
        Ok(RefreshToken {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            valid: valid != 0,
            created_at: parse_datetime_or_now(row.try_get("created_at")?),
            updated_at: parse_datetime_or_now(row.try_get("updated_at")?),
        })
    }
}

/// Catch report model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    /// Owning user, set at creation and immutable thereafter
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub city: String,
    pub fish_species: String,
    pub weight: f64,
    pub length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub date_of_catch: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&SqliteRow> for Report {
    type Error = sqlx::Error;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        Ok(Report {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            location_name: row.try_get("location_name")?,
            city: row.try_get("city")?,
            fish_species: row.try_get("fish_species")?,
            weight: row.try_get("weight")?,
            length: row.try_get("length")?,
            image_url: row.try_get("image_url")?,
            date_of_catch: parse_datetime_or_now(row.try_get("date_of_catch")?),
            created_at: parse_datetime_or_now(row.try_get("created_at")?),
            updated_at: parse_datetime_or_now(row.try_get("updated_at")?),
        })
    }
}

/// New report (for insertion and full replacement)
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub city: String,
    pub fish_species: String,
    pub weight: f64,
    pub length: f64,
    pub image_url: Option<String>,
    pub date_of_catch: DateTime<Utc>,
}

/// Partial report update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub city: Option<String>,
    pub fish_species: Option<String>,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub image_url: Option<String>,
    pub date_of_catch: Option<DateTime<Utc>>,
}

/// Webhook subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    pub user_id: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&SqliteRow> for Webhook {
    type Error = sqlx::Error;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        Ok(Webhook {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            url: row.try_get("url")?,
            created_at: parse_datetime_or_now(row.try_get("created_at")?),
        })
    }
}

/// New webhook subscription (for insertion)
#[derive(Debug, Clone)]
pub struct NewWebhook {
    pub user_id: String,
    pub url: String,
}
