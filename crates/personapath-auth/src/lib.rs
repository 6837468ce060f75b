//! personapath-auth
//!
//! Identity token verification and admin authorization. Tokens are minted
//! by the external identity provider; this crate only checks them.

pub mod admin;
pub mod error;
pub mod jwt;

pub use admin::{ADMIN_ROLE, require_admin};
pub use jwt::{Identity, IdentityClaims, TokenVerifier};
