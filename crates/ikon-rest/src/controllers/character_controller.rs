//! Character controller.
//!
//! Routes act on the caller's selected character.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, ok, ApiResponse, AppError, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use ikon_service::{
    CharacterResponse, CreateCharacterRequest, CustomizeAppearanceRequest, EquipItemRequest, UpgradeStatRequest,
};
use tracing::debug;

/// Creates the character router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_selected_character).post(create_character))
        .route("/stats", post(upgrade_stat))
        .route("/equipment", post(equip_item))
        .route("/appearance", patch(customize_appearance))
}

/// The caller's selected character.
#[utoipa::path(
    get,
    path = "/api/character",
    tag = "character",
    responses(
        (status = 200, description = "Selected character", body = CharacterResponse),
        (status = 404, description = "No character")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_selected_character(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<CharacterResponse> {
    let response = state.character_service.get_selected_character(user.id()).await?;
    ok(response)
}

/// Create an additional character.
#[utoipa::path(
    post,
    path = "/api/character",
    tag = "character",
    request_body = CreateCharacterRequest,
    responses(
        (status = 201, description = "Character created", body = CharacterResponse),
        (status = 422, description = "Invalid request")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_character(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CharacterResponse>>), AppError> {
    debug!(user_id = %user.id(), class = %request.character_class, "Create character request");

    let response = state.character_service.create_character(user.id(), request).await?;
    Ok(created(response))
}

/// Raise one attribute of the selected character.
#[utoipa::path(
    post,
    path = "/api/character/stats",
    tag = "character",
    request_body = UpgradeStatRequest,
    responses(
        (status = 200, description = "Updated character", body = CharacterResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upgrade_stat(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpgradeStatRequest>,
) -> ApiResult<CharacterResponse> {
    let selected = state.character_service.get_selected_character(user.id()).await?;
    let response = state
        .character_service
        .upgrade_character_stat(user.id(), selected.id, request)
        .await?;
    ok(response)
}

/// Equip an item on the selected character.
#[utoipa::path(
    post,
    path = "/api/character/equipment",
    tag = "character",
    request_body = EquipItemRequest,
    responses(
        (status = 200, description = "Updated character", body = CharacterResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn equip_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<EquipItemRequest>,
) -> ApiResult<CharacterResponse> {
    let selected = state.character_service.get_selected_character(user.id()).await?;
    let response = state.character_service.equip_item(user.id(), selected.id, request).await?;
    ok(response)
}

/// Change the selected character's appearance.
#[utoipa::path(
    patch,
    path = "/api/character/appearance",
    tag = "character",
    request_body = CustomizeAppearanceRequest,
    responses(
        (status = 200, description = "Updated character", body = CharacterResponse),
        (status = 422, description = "Invalid color")
    ),
    security(("bearer_auth" = []))
)]
pub async fn customize_appearance(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CustomizeAppearanceRequest>,
) -> ApiResult<CharacterResponse> {
    let selected = state.character_service.get_selected_character(user.id()).await?;
    let response = state
        .character_service
        .customize_appearance(user.id(), selected.id, request)
        .await?;
    ok(response)
}
