use tracing::warn;

use crate::error::AuthError;
use crate::jwt::Identity;

/// Role claim granting access to the admin dashboard.
pub const ADMIN_ROLE: &str = "admin";

/// Admit only identities carrying the admin role.
pub fn require_admin(identity: &Identity) -> Result<(), AuthError> {
    if identity.has_role(ADMIN_ROLE) {
        Ok(())
    } else {
        warn!(subject = %identity.subject, "admin access denied");
        Err(AuthError::Forbidden("admin role required".to_string()))
    }
}
