use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use personapath_auth::ADMIN_ROLE;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FeedbackRequest {
    /// Range-checked by the store so out-of-range values are a 400.
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// Rate a report. Only the report from the caller's own session (or any
/// report, for admins) can be rated.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<FeedbackRequest>,
) -> Result<StatusCode, ApiError> {
    let owns_report = state
        .sessions
        .lock()
        .await
        .get(&user.0.subject)
        .and_then(|s| s.report_id().map(|rid| rid == id))
        .unwrap_or(false);

    if !owns_report && !user.0.has_role(ADMIN_ROLE) {
        return Err(ApiError::Forbidden(
            "can only rate the report from your own session".to_string(),
        ));
    }

    let found = state
        .store
        .lock()
        .await
        .attach_feedback(&id, req.rating, &req.comment)?;

    if found {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("report not found: {id}")))
    }
}
