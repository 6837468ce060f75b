use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use personapath_auth::Identity;
use personapath_auth::error::AuthError;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and verifies the
/// token. On success, inserts `AuthUser` into request extensions for
/// handlers to use, and into the response extensions for auditing.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = {
        let token = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        state.verifier.verify(token).inspect_err(|e| {
            tracing::debug!(error = %e, "token rejected");
        })?
    };

    let user = AuthUser(identity);
    req.extensions_mut().insert(user.clone());

    let mut response = next.run(req).await;
    // Read back by the audit layer.
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Authenticated user extracted from a verified token.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);
