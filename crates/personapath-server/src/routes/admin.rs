use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Serialize;

use personapath_auth::require_admin;
use personapath_core::models::saved_report::SavedReport;
use personapath_export::csv_export::{EXPORT_FILENAME, export_csv};
use personapath_export::render::render_markdown;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_reports(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<SavedReport>>, ApiError> {
    require_admin(&user.0)?;
    Ok(Json(state.store.lock().await.list()))
}

pub async fn get_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user.0)?;
    let saved = state
        .store
        .lock()
        .await
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("report not found: {id}")))?;

    let body = render_markdown(&saved.user_profile, &saved.report)?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], body))
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_reports: usize,
    pub average_rating: Option<f64>,
    /// One decimal place, or `N/A` with no ratings.
    pub average_display: String,
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StatsResponse>, ApiError> {
    require_admin(&user.0)?;
    let stats = state.store.lock().await.stats();
    Ok(Json(StatsResponse {
        total_reports: stats.total_reports,
        average_rating: stats.average_rating,
        average_display: stats.average_display(),
    }))
}

pub async fn export(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user.0)?;
    let reports = state.store.lock().await.list();
    let bytes = export_csv(&reports)?;
    tracing::info!(count = reports.len(), "exported reports");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}
