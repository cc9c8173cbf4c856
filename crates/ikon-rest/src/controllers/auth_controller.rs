//! Mini App auth controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::post, Router};
use ikon_service::{AuthInitRequest, AuthResponse};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/init", post(init))
}

/// Issue a bearer token for a player registered through the bot.
#[utoipa::path(
    post,
    path = "/api/auth/init",
    tag = "auth",
    request_body = AuthInitRequest,
    responses(
        (status = 200, description = "Session issued", body = AuthResponse),
        (status = 404, description = "Unknown Telegram user"),
        (status = 422, description = "Invalid request")
    )
)]
pub async fn init(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AuthInitRequest>,
) -> ApiResult<AuthResponse> {
    debug!(telegram_id = request.telegram_id, "Auth init request");

    let response = state.auth_service.init(request.telegram_id).await?;
    ok(response)
}
