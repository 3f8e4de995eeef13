use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{StatusCode, request::Parts},
};
use std::convert::Infallible;

use crate::auth::{TOKEN_HEADER, claims::AuthUser, decode_jwt};

fn token_from_parts(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Reads the JWT from the `token` header and verifies it.
///
/// # Errors
/// - `401 Unauthorized` if the header is missing or the token is invalid or expired.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts)
            .ok_or((StatusCode::UNAUTHORIZED, "Missing token header"))?;

        let claims = decode_jwt(token)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

        Ok(AuthUser(claims))
    }
}

/// `Option<AuthUser>` for public routes that still want to know who is calling.
/// A bad token is treated the same as no token.
impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(<AuthUser as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .ok())
    }
}
