//! Authenticated player extractor.

use crate::responses::error_response;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use ikon_core::{ErrorResponse, IkonError, UserId};
use ikon_security::Claims;

/// Claims of the player behind a valid bearer token.
///
/// The auth middleware verifies the token and stores the claims in the
/// request extensions; this extractor only reads them back.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.0.user_id()
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection for protected routes.
#[derive(Debug)]
pub struct AuthError(IkonError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);
        error_response(status, ErrorResponse::from_error(&self.0))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(Self(claims.clone()));
        }

        match parts.headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) {
            None => Err(AuthError(IkonError::unauthorized("Missing authorization header"))),
            Some(header) if !header.starts_with("Bearer ") => {
                Err(AuthError(IkonError::unauthorized("Invalid authorization format")))
            }
            Some(_) => Err(AuthError(IkonError::InvalidToken("Invalid or expired token".to_string()))),
        }
    }
}
