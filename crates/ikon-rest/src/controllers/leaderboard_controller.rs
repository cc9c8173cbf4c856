//! Seasonal leaderboard controller.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use ikon_core::domain::SeasonInfo;
use ikon_service::{FriendsLeaderboardRequest, LeaderboardEntryResponse, TopPlayersQuery};

/// Creates the leaderboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/top", get(get_top_players))
        .route("/rank", get(get_user_rank))
        .route("/season", get(get_season_info))
        .route("/friends", post(get_friends_leaderboard))
}

/// Best players of the current season.
#[utoipa::path(
    get,
    path = "/api/leaderboard/top",
    tag = "leaderboard",
    params(TopPlayersQuery),
    responses(
        (status = 200, description = "Ranked entries", body = [LeaderboardEntryResponse])
    )
)]
pub async fn get_top_players(
    State(state): State<AppState>,
    Query(query): Query<TopPlayersQuery>,
) -> ApiResult<Vec<LeaderboardEntryResponse>> {
    let response = state.leaderboard_service.get_top_players(query.limit).await?;
    ok(response)
}

/// The caller's current-season entry, or null when unranked.
#[utoipa::path(
    get,
    path = "/api/leaderboard/rank",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Entry or null", body = Option<LeaderboardEntryResponse>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_rank(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Option<LeaderboardEntryResponse>> {
    let response = state.leaderboard_service.get_user_rank(user.id()).await?;
    ok(response)
}

/// Current season window.
#[utoipa::path(
    get,
    path = "/api/leaderboard/season",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Season info", body = SeasonInfo)
    )
)]
pub async fn get_season_info(State(state): State<AppState>) -> ApiResult<SeasonInfo> {
    let response = state.leaderboard_service.get_season_info().await?;
    ok(response)
}

/// Ranks of the given players in the current season.
#[utoipa::path(
    post,
    path = "/api/leaderboard/friends",
    tag = "leaderboard",
    request_body = FriendsLeaderboardRequest,
    responses(
        (status = 200, description = "Ranked entries", body = [LeaderboardEntryResponse])
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_friends_leaderboard(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<FriendsLeaderboardRequest>,
) -> ApiResult<Vec<LeaderboardEntryResponse>> {
    let response = state
        .leaderboard_service
        .get_friends_leaderboard(&request.user_ids)
        .await?;
    ok(response)
}
