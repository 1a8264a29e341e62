//! Request/Response DTOs for the API

use creel_db::Report;
use serde::{Deserialize, Serialize};

use crate::links::Links;

// ==================== Auth Types ====================

/// Registration request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Registration response
#[derive(Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair response for login and refresh
#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Auth endpoint index response
#[derive(Serialize)]
pub struct AuthIndexResponse {
    pub message: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

// ==================== Report Types ====================

/// Report body for creation and full replacement
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub city: String,
    pub fish_species: String,
    pub weight: f64,
    pub length: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub date_of_catch: chrono::DateTime<chrono::Utc>,
}

/// Partial report update body; absent fields are left unchanged
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatchBody {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub fish_species: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub date_of_catch: Option<chrono::DateTime<chrono::Utc>>,
}

/// Report representation with hypermedia links
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
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
    pub date_of_catch: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl ReportResponse {
    /// Shape a stored report for the response, with tier-scoped links
    pub fn from_report(report: Report, links: Links) -> Self {
        Self {
            id: report.id,
            user_id: report.user_id,
            latitude: report.latitude,
            longitude: report.longitude,
            location_name: report.location_name,
            city: report.city,
            fish_species: report.fish_species,
            weight: report.weight,
            length: report.length,
            image_url: report.image_url,
            date_of_catch: report.date_of_catch.to_rfc3339(),
            created_at: report.created_at.to_rfc3339(),
            updated_at: report.updated_at.to_rfc3339(),
            links,
        }
    }
}

/// Report collection response
#[derive(Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportResponse>,
    #[serde(rename = "_links")]
    pub links: Links,
}

// ==================== Webhook Types ====================

/// Webhook registration request
#[derive(Deserialize)]
pub struct WebhookRequest {
    pub url: String,
}

/// Webhook registration response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub id: String,
    pub url: String,
    pub created_at: String,
}
