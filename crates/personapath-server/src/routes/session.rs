use std::collections::HashMap;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

use personapath_auth::require_admin;
use personapath_core::models::profile::ProfileForm;
use personapath_export::render::render_markdown;
use personapath_session::{QuizStep, Session, SessionError, SessionView};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The caller's session, created on first use.
fn session_for<'a>(sessions: &'a mut HashMap<String, Session>, user: &AuthUser) -> &'a mut Session {
    sessions
        .entry(user.0.subject.clone())
        .or_insert_with(|| Session::new(user.0.clone()))
}

async fn apply(
    state: &AppState,
    user: &AuthUser,
    action: impl FnOnce(&mut Session) -> Result<(), SessionError>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = session_for(&mut sessions, user);
    action(session)?;
    Ok(Json(session.view()))
}

pub async fn get_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionView>, ApiError> {
    apply(&state, &user, |_| Ok(())).await
}

/// Sign out: the session and anything in flight for it are discarded.
pub async fn end_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> StatusCode {
    if state.sessions.lock().await.remove(&user.0.subject).is_some() {
        tracing::info!(subject = %user.0.subject, "session ended");
    }
    StatusCode::NO_CONTENT
}

pub async fn start(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionView>, ApiError> {
    apply(&state, &user, Session::start).await
}

pub async fn submit_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<SessionView>, ApiError> {
    apply(&state, &user, |s| s.submit_profile(form)).await
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub option_id: String,
}

pub async fn select_option(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SessionView>, ApiError> {
    apply(&state, &user, |s| s.select_option(&req.option_id)).await
}

/// Record the selected answer. After the last question this runs report
/// generation and responds with the Results or Error view. A result for a
/// run abandoned by sign-out is dropped with a 409 (or 404 if no session
/// remains).
pub async fn advance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionView>, ApiError> {
    let input = {
        let mut sessions = state.sessions.lock().await;
        let session = session_for(&mut sessions, &user);
        match session.advance()? {
            QuizStep::Next { .. } => return Ok(Json(session.view())),
            QuizStep::Completed => session.generation_input()?,
        }
    };

    // The session sits in Loading with the lock released while the
    // backend works.
    let result = state.generator.generate(&input.answers, &input.profile).await;

    let mut sessions = state.sessions.lock().await;
    let Some(session) = sessions.get_mut(&user.0.subject) else {
        tracing::info!(subject = %user.0.subject, "session ended during generation, result dropped");
        return Err(ApiError::NotFound("session ended".to_string()));
    };
    let mut store = state.store.lock().await;
    session.finish_generation(input.run_id, result, &mut store)?;
    Ok(Json(session.view()))
}

pub async fn retake(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionView>, ApiError> {
    apply(&state, &user, Session::retake).await
}

pub async fn open_admin(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionView>, ApiError> {
    require_admin(&user.0)?;
    apply(&state, &user, Session::open_admin).await
}

pub async fn close_admin(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionView>, ApiError> {
    apply(&state, &user, Session::close_admin).await
}

/// The current result as Markdown.
pub async fn report_markdown(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.lock().await;
    let (profile, report) = sessions
        .get(&user.0.subject)
        .and_then(|s| s.profile().zip(s.report()))
        .ok_or_else(|| ApiError::NotFound("no report in this session".to_string()))?;

    let body = render_markdown(profile, report)?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], body))
}
