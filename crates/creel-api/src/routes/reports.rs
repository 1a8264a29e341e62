//! Catch report routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use creel_auth::authorize_owner;
use creel_db::{NewReport, Report, ReportPatch};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::links::{collection_links, report_links};
use crate::state::AppState;

use super::auth::{MaybeAuth, RequireAuth};
use super::types::{ReportBody, ReportListResponse, ReportPatchBody, ReportResponse};

/// Shape a report with links scoped to the caller's tier
fn shape_report(state: &AppState, report: Report, caller: Option<&creel_auth::Identity>) -> ReportResponse {
    let is_authenticated = caller.is_some();
    let is_owner = caller.is_some_and(|identity| identity.id == report.user_id);
    let links = report_links(&state.base_url, &report.id, is_authenticated, is_owner);
    ReportResponse::from_report(report, links)
}

/// Load a report or fail with 404
async fn load_report(state: &AppState, id: &str) -> Result<Report, ApiError> {
    state
        .db
        .get_report_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Report: {}", id)))
}

/// GET /api/v1/reports
///
/// Readable without authentication; the link sets in the response vary
/// by caller tier.
async fn list_reports(
    MaybeAuth(caller): MaybeAuth,
    State(state): State<AppState>,
) -> Result<Json<ReportListResponse>, ApiError> {
    let reports = state.db.list_reports().await?;

    let shaped = reports
        .into_iter()
        .map(|report| shape_report(&state, report, caller.as_ref()))
        .collect();

    Ok(Json(ReportListResponse {
        reports: shaped,
        links: collection_links(&state.base_url, caller.is_some()),
    }))
}

/// GET /api/v1/reports/{id}
async fn get_report(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = load_report(&state, &id).await?;
    Ok(Json(shape_report(&state, report, Some(&identity))))
}

/// POST /api/v1/reports
async fn create_report(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<(StatusCode, Json<ReportResponse>), ApiError> {
    debug!("Creating report for user: {}", identity.username);

    let report = state
        .db
        .insert_report(NewReport {
            user_id: identity.id.clone(),
            latitude: body.latitude,
            longitude: body.longitude,
            location_name: body.location_name,
            city: body.city,
            fish_species: body.fish_species,
            weight: body.weight,
            length: body.length,
            image_url: body.image_url,
            date_of_catch: body.date_of_catch,
        })
        .await?;

    info!("Created report {} for user {}", report.id, identity.username);

    notify_subscribers(&state, &report).await;

    Ok((
        StatusCode::CREATED,
        Json(shape_report(&state, report, Some(&identity))),
    ))
}

/// Fan the new report out to webhook subscribers in the background
async fn notify_subscribers(state: &AppState, report: &Report) {
    let endpoints = match state.db.list_webhooks().await {
        Ok(hooks) => hooks.into_iter().map(|h| h.url).collect::<Vec<_>>(),
        Err(e) => {
            warn!("Failed to load webhook subscriptions: {}", e);
            return;
        }
    };

    if endpoints.is_empty() {
        return;
    }

    let payload = match serde_json::to_value(report) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to serialize report for webhook delivery: {}", e);
            return;
        }
    };

    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        notifier.broadcast(endpoints, payload).await;
    });
}

/// PUT /api/v1/reports/{id}
async fn replace_report(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReportBody>,
) -> Result<StatusCode, ApiError> {
    let report = load_report(&state, &id).await?;
    authorize_owner(&identity, &report.user_id)?;

    state
        .db
        .replace_report(
            &id,
            &NewReport {
                user_id: report.user_id,
                latitude: body.latitude,
                longitude: body.longitude,
                location_name: body.location_name,
                city: body.city,
                fish_species: body.fish_species,
                weight: body.weight,
                length: body.length,
                image_url: body.image_url,
                date_of_catch: body.date_of_catch,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/reports/{id}
async fn update_report(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReportPatchBody>,
) -> Result<StatusCode, ApiError> {
    let report = load_report(&state, &id).await?;
    authorize_owner(&identity, &report.user_id)?;

    state
        .db
        .patch_report(
            &id,
            ReportPatch {
                latitude: body.latitude,
                longitude: body.longitude,
                location_name: body.location_name,
                city: body.city,
                fish_species: body.fish_species,
                weight: body.weight,
                length: body.length,
                image_url: body.image_url,
                date_of_catch: body.date_of_catch,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/reports/{id}
async fn delete_report(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let report = load_report(&state, &id).await?;
    authorize_owner(&identity, &report.user_id)?;

    state.db.delete_report(&id).await?;

    info!("Deleted report {} for user {}", id, identity.username);

    Ok(StatusCode::NO_CONTENT)
}

/// Create report routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/reports", get(list_reports))
        .route("/api/v1/reports", post(create_report))
        .route("/api/v1/reports/{id}", get(get_report))
        .route("/api/v1/reports/{id}", put(replace_report))
        .route("/api/v1/reports/{id}", patch(update_report))
        .route("/api/v1/reports/{id}", delete(delete_report))
}
