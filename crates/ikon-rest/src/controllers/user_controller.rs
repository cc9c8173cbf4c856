//! Player profile controller.

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
use ikon_service::{UpdateExperienceRequest, UpdateGoldRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/gold", post(update_gold))
        .route("/experience", post(update_experience))
}

/// Current player's profile.
#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = "user",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<UserResponse> {
    let response = state.user_service.get_user(user.id()).await?;
    ok(response)
}

/// Add or spend gold.
#[utoipa::path(
    post,
    path = "/api/user/gold",
    tag = "user",
    request_body = UpdateGoldRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Insufficient gold"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_gold(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateGoldRequest>,
) -> ApiResult<UserResponse> {
    debug!(user_id = %user.id(), amount = request.amount, "Update gold request");

    let response = state.user_service.update_user_gold(user.id(), request.amount).await?;
    ok(response)
}

/// Grant experience.
#[utoipa::path(
    post,
    path = "/api/user/experience",
    tag = "user",
    request_body = UpdateExperienceRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Negative amount")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_experience(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateExperienceRequest>,
) -> ApiResult<UserResponse> {
    debug!(user_id = %user.id(), amount = request.amount, "Update experience request");

    let response = state
        .user_service
        .update_user_experience(user.id(), request.amount)
        .await?;
    ok(response)
}
