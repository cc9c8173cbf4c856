//! Daily quest controller.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{ok, AppError, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use ikon_core::{IkonError, QuestId};
use ikon_service::{QuestCompletionResponse, QuestResponse, UpdateQuestProgressRequest};
use tracing::debug;

/// Creates the quest router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_daily_quests))
        .route("/active", get(get_active_quests))
        .route("/:quest_id/complete", post(complete_quest))
        .route("/:quest_id/progress", post(update_quest_progress))
}

/// Today's quests, generating any that are missing.
#[utoipa::path(
    get,
    path = "/api/quests",
    tag = "quests",
    responses(
        (status = 200, description = "Today's quests", body = [QuestResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_daily_quests(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<Vec<QuestResponse>> {
    let response = state.quest_service.generate_daily_quests(user.id()).await?;
    ok(response)
}

/// Incomplete, unexpired quests.
#[utoipa::path(
    get,
    path = "/api/quests/active",
    tag = "quests",
    responses(
        (status = 200, description = "Active quests", body = [QuestResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_active_quests(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<Vec<QuestResponse>> {
    let response = state.quest_service.get_active_quests(user.id()).await?;
    ok(response)
}

/// Complete a quest and collect its rewards.
#[utoipa::path(
    post,
    path = "/api/quests/{quest_id}/complete",
    tag = "quests",
    params(("quest_id" = String, Path, description = "Quest instance ID")),
    responses(
        (status = 200, description = "Quest completed", body = QuestCompletionResponse),
        (status = 400, description = "Already completed or expired"),
        (status = 404, description = "Quest not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn complete_quest(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(quest_id): Path<String>,
) -> ApiResult<QuestCompletionResponse> {
    debug!(user_id = %user.id(), quest_id = %quest_id, "Complete quest request");

    let quest_id = parse_quest_id(&quest_id)?;
    let response = state.quest_service.complete_quest(quest_id, user.id()).await?;
    ok(response)
}

/// Report progress on a quest.
#[utoipa::path(
    post,
    path = "/api/quests/{quest_id}/progress",
    tag = "quests",
    params(("quest_id" = String, Path, description = "Quest instance ID")),
    request_body = UpdateQuestProgressRequest,
    responses(
        (status = 200, description = "Updated quest", body = QuestResponse),
        (status = 404, description = "Quest not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_quest_progress(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(quest_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateQuestProgressRequest>,
) -> ApiResult<QuestResponse> {
    let quest_id = parse_quest_id(&quest_id)?;
    let progress = u32::try_from(request.progress).unwrap_or(u32::MAX);

    let response = state
        .quest_service
        .update_quest_progress(quest_id, user.id(), progress)
        .await?;
    ok(response)
}

fn parse_quest_id(raw: &str) -> Result<QuestId, AppError> {
    QuestId::parse(raw).map_err(|_| AppError(IkonError::validation(format!("Invalid quest ID: {raw}"))))
}
