//! Main application router.

use crate::{
    controllers::{
        auth_controller, character_controller, game_controller, health_controller, leaderboard_controller,
        quest_controller, user_controller,
    },
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use ikon_config::ServerConfig;
use ikon_security::TokenProviderInterface;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the application router.
///
/// Every `/api` request passes through the auth middleware; handlers that
/// need a player take the `AuthenticatedUser` extractor.
pub fn create_router(
    state: AppState,
    token_provider: Arc<dyn TokenProviderInterface>,
    server_config: &ServerConfig,
) -> Router {
    let auth_state = AuthMiddlewareState::new(token_provider);

    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/user", user_controller::router())
        .nest("/character", character_controller::router())
        .nest("/quests", quest_controller::router())
        .nest("/games", game_controller::router())
        .nest("/leaderboard", leaderboard_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .route("/", get(root))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer from the configured origins.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "IkonGrind API"
}
