use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims carried by a PersonaPath identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

/// A verified, signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl From<IdentityClaims> for Identity {
    fn from(claims: IdentityClaims) -> Self {
        Identity {
            subject: claims.sub,
            name: claims.name,
            roles: claims.roles,
        }
    }
}

/// Verifies HS256 identity tokens against a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<IdentityClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidToken => {
                    AuthError::InvalidToken(e.to_string())
                }
                _ => AuthError::Jwt(e),
            }
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }

        Ok(data.claims.into())
    }
}

/// Sign claims with the shared secret. The identity provider does this in
/// production; local tooling and tests use it to mint tokens.
pub fn issue_token(secret: &[u8], claims: &IdentityClaims) -> Result<String, AuthError> {
    let token = encode(&Header::new(Algorithm::HS256), claims, &EncodingKey::from_secret(secret))?;
    Ok(token)
}

/// Claims for `sub` valid for `ttl_secs` from now.
pub fn claims_for(sub: &str, roles: &[&str], ttl_secs: u64) -> IdentityClaims {
    let now = jiff::Timestamp::now().as_second().max(0) as u64;
    IdentityClaims {
        sub: sub.to_string(),
        exp: now + ttl_secs,
        iat: now,
        name: None,
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}
