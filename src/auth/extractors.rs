use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::AppError;

/// Validates the bearer token and yields the caller's user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header"))?;

        let claims = JwtKeys::from_ref(state).verify(token.trim()).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser(claims.sub))
    }
}
