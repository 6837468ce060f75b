//! personapath-server
//!
//! HTTP surface for PersonaPath: identity-gated session routes driving the
//! quiz flow, report feedback, and the admin dashboard.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use std::future::Future;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route(
            "/session",
            get(routes::session::get_session).delete(routes::session::end_session),
        )
        .route("/session/start", post(routes::session::start))
        .route("/session/profile", post(routes::session::submit_profile))
        .route("/session/select", post(routes::session::select_option))
        .route("/session/advance", post(routes::session::advance))
        .route("/session/retake", post(routes::session::retake))
        .route(
            "/session/admin",
            post(routes::session::open_admin).delete(routes::session::close_admin),
        )
        .route("/session/report", get(routes::session::report_markdown))
        .route(
            "/reports/{id}/feedback",
            post(routes::reports::submit_feedback),
        )
        .route("/admin/reports", get(routes::admin::list_reports))
        .route("/admin/reports/{id}", get(routes::admin::get_report))
        .route("/admin/stats", get(routes::admin::stats))
        .route("/admin/export.csv", get(routes::admin::export))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Public
        .route("/health", get(routes::health::health_check))
        .route("/questions", get(routes::questions::list_questions))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

/// Resolves when `signal` fires. If the signal handler could not be
/// installed the error is logged and this never resolves, so the server
/// keeps running instead of stopping at once.
pub async fn shutdown_signal(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::info!("shutting down"),
        Err(e) => {
            tracing::error!(error = %e, "failed to install shutdown signal handler");
            std::future::pending::<()>().await;
        }
    }
}
