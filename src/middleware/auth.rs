use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::server::AppState;

/// Acting user resolved from a verified bearer token.
///
/// Taking this as a handler argument makes the route require authentication;
/// a missing or bad credential is rejected with a 401 envelope before the
/// handler body runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| AuthError::InvalidScheme))
            .transpose()?;

        let user_id = state.verifier.user_id_from_header(header)?;
        let user = AuthUser { user_id };
        parts.extensions.insert(user);

        Ok(user)
    }
}
