//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use ikon_security::TokenProviderInterface;
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthMiddlewareState {
    #[must_use]
    pub fn new(token_provider: Arc<dyn TokenProviderInterface>) -> Self {
        Self { token_provider }
    }
}

/// Verifies a bearer token, if present, and stores its claims in the
/// request extensions.
///
/// Requests without a valid token pass through untouched; protected
/// handlers reject them through the `AuthenticatedUser` extractor.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        match state.token_provider.validate_access_token(token) {
            Ok(claims) => {
                debug!(user_id = %claims.user_id, "Authenticated request");
                request.extensions_mut().insert(claims);
            }
            Err(e) => debug!(error = %e, "Token validation failed"),
        }
    }

    next.run(request).await
}
