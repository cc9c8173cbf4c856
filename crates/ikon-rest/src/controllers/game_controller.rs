//! Mini-game controller.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use ikon_service::{DailyStatsResponse, EndGameRequest, GameCompletionResponse, GameStartResponse, StartGameRequest};
use tracing::debug;

/// Creates the game router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_game))
        .route("/end", post(end_game))
        .route("/stats", get(get_daily_stats))
}

/// Check the daily allowance and describe a new session.
#[utoipa::path(
    post,
    path = "/api/games/start",
    tag = "games",
    request_body = StartGameRequest,
    responses(
        (status = 200, description = "Session descriptor", body = GameStartResponse),
        (status = 429, description = "Daily game limit reached")
    ),
    security(("bearer_auth" = []))
)]
pub async fn start_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<StartGameRequest>,
) -> ApiResult<GameStartResponse> {
    debug!(user_id = %user.id(), game_type = %request.game_type, "Start game request");

    let response = state.game_service.start_game(user.id(), request.game_type).await?;
    ok(response)
}

/// Record a finished session and pay its reward.
#[utoipa::path(
    post,
    path = "/api/games/end",
    tag = "games",
    request_body = EndGameRequest,
    responses(
        (status = 200, description = "Session recorded", body = GameCompletionResponse),
        (status = 422, description = "Invalid session"),
        (status = 429, description = "Daily game limit reached")
    ),
    security(("bearer_auth" = []))
)]
pub async fn end_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<EndGameRequest>,
) -> ApiResult<GameCompletionResponse> {
    debug!(user_id = %user.id(), game_type = %request.game_type, score = request.score, "End game request");

    let response = state.game_service.end_game(user.id(), request).await?;
    ok(response)
}

/// Today's play statistics.
#[utoipa::path(
    get,
    path = "/api/games/stats",
    tag = "games",
    responses(
        (status = 200, description = "Daily statistics", body = DailyStatsResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_daily_stats(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<DailyStatsResponse> {
    let response = state.game_service.get_daily_stats(user.id()).await?;
    ok(response)
}
