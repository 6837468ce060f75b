use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::middleware::auth::AuthUser;

/// Logs every API request as a structured audit event.
///
/// The subject is read from the response extensions, where handlers behind
/// `require_auth` leave it; public routes log without one.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let subject = response
        .extensions()
        .get::<AuthUser>()
        .map(|user| user.0.subject.clone());
    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        subject = subject.as_deref().unwrap_or("-"),
        "api_request"
    );

    response
}
