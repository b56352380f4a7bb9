use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::config::SecurityConfig;

/// Registered time claims plus whatever else the issuer put in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Reads the numeric user id from `claim`. Accepts a JSON number or a decimal string.
    pub fn user_id(&self, claim: &str) -> Result<i32, AuthError> {
        let value = self
            .extra
            .get(claim)
            .ok_or_else(|| AuthError::MissingUserClaim(claim.to_string()))?;

        let parsed = match value {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        };

        parsed.ok_or_else(|| AuthError::InvalidUserClaim(claim.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header must use Bearer token format")]
    InvalidScheme,

    #[error("JWT token has expired")]
    Expired,

    #[error("Invalid JWT token")]
    InvalidToken,

    #[error("JWT token has no '{0}' claim")]
    MissingUserClaim(String),

    #[error("JWT claim '{0}' is not a numeric user id")]
    InvalidUserClaim(String),
}

/// Verifies HS256 bearer tokens and resolves the acting user id
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    user_id_claim: String,
}

impl TokenVerifier {
    pub fn new(security: &SecurityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = security.jwt_leeway_secs;
        if let Some(issuer) = &security.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            validation,
            user_id_claim: security.user_id_claim.clone(),
        }
    }

    /// Validate signature and expiry, then extract claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => {
                    warn!("JWT rejected: {}", e);
                    AuthError::InvalidToken
                }
            })
    }

    /// Full path from the raw header value to a user id
    pub fn user_id_from_header(&self, header: Option<&str>) -> Result<i32, AuthError> {
        let token = bearer_token(header.ok_or(AuthError::MissingHeader)?)?;
        let claims = self.verify(token)?;
        claims.user_id(&self.user_id_claim)
    }
}

/// Strips the `Bearer` scheme from an Authorization header value
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header.trim().split_once(' ').ok_or(AuthError::InvalidScheme)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }
    Ok(token.trim())
}
