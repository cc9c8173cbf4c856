//! End-to-end tests of the router over the in-memory repositories.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use ikon_config::{SecurityConfig, ServerConfig};
use ikon_core::domain::TelegramProfile;
use ikon_core::{HealthCheck, HealthStatus};
use ikon_repository::{
    InMemoryCharacterRepository, InMemoryGameSessionRepository, InMemoryLeaderboardRepository,
    InMemoryQuestRepository, InMemoryUserRepository,
};
use ikon_rest::{create_router, AppState};
use ikon_security::TokenProvider;
use ikon_service::{
    AuthServiceComponent, CharacterServiceComponent, GameServiceComponent, LeaderboardServiceComponent,
    QuestServiceComponent, UserService, UserServiceComponent,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    users: Arc<dyn UserService>,
}

fn build_state() -> (AppState, Arc<TokenProvider>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let characters = Arc::new(InMemoryCharacterRepository::new());
    let quests = Arc::new(InMemoryQuestRepository::new());
    let sessions = Arc::new(InMemoryGameSessionRepository::new());
    let leaderboard = Arc::new(InMemoryLeaderboardRepository::new());
    let tokens = Arc::new(TokenProvider::new(SecurityConfig::default()));

    let state = AppState::new(
        Arc::new(UserServiceComponent::new(users.clone(), characters.clone())),
        Arc::new(CharacterServiceComponent::new(characters.clone(), users.clone())),
        Arc::new(QuestServiceComponent::new(quests, users.clone(), characters.clone())),
        Arc::new(GameServiceComponent::new(sessions, users.clone(), characters)),
        Arc::new(LeaderboardServiceComponent::new(leaderboard, users.clone())),
        Arc::new(AuthServiceComponent::new(users, tokens.clone())),
    );
    (state, tokens)
}

fn app() -> TestApp {
    let (state, tokens) = build_state();
    let users = state.user_service.clone();
    TestApp {
        router: create_router(state, tokens, &ServerConfig::default()),
        users,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Registers a player the way the bot does and signs in.
    async fn login(&self, telegram_id: i64) -> String {
        self.users
            .create_or_update_user(&TelegramProfile::new(telegram_id, "Tester"))
            .await
            .unwrap();
        let (status, body) = self
            .send(Method::POST, "/api/auth/init", None, Some(json!({ "telegramId": telegram_id })))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["accessToken"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

struct Failing;

#[async_trait::async_trait]
impl HealthCheck for Failing {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Unhealthy("connection refused".to_string())
    }
}

#[tokio::test]
async fn test_ready_reflects_health_checks() {
    let app = app();
    let (status, _) = app.send(Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (state, tokens) = build_state();
    let router = create_router(state.with_health_check(Arc::new(Failing)), tokens, &ServerConfig::default());
    let response = router
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = app();
    for (method, uri) in [
        (Method::GET, "/api/user/profile"),
        (Method::GET, "/api/quests"),
        (Method::GET, "/api/games/stats"),
        (Method::GET, "/api/leaderboard/rank"),
        (Method::GET, "/api/character"),
    ] {
        let (status, body) = app.send(method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["success"], false);
    }

    let (status, body) = app.send(Method::GET, "/api/user/profile", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_auth_init_unknown_user_is_404() {
    let app = app();
    let (status, body) = app
        .send(Method::POST, "/api/auth/init", None, Some(json!({ "telegramId": 404 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_profile_and_gold() {
    let app = app();
    let token = app.login(11).await;

    let (status, body) = app.send(Method::GET, "/api/user/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["telegramId"], 11);
    assert_eq!(body["data"]["gold"], 100);

    let (status, body) = app
        .send(Method::POST, "/api/user/gold", Some(&token), Some(json!({ "amount": -150 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BUSINESS_RULE_VIOLATION");

    let (status, body) = app
        .send(Method::POST, "/api/user/experience", Some(&token), Some(json!({ "amount": 250 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["level"], 3);
    assert_eq!(body["data"]["experience"], 50);

    let (status, _) = app
        .send(Method::POST, "/api/user/experience", Some(&token), Some(json!({ "amount": -1 })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_quest_flow() {
    let app = app();
    let token = app.login(12).await;

    let (status, body) = app.send(Method::GET, "/api/quests", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let quests = body["data"].as_array().unwrap();
    assert_eq!(quests.len(), 5);
    let quest_id = quests[0]["id"].as_str().unwrap().to_string();

    let (status, again) = app.send(Method::GET, "/api/quests", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["data"].as_array().unwrap().len(), 5);

    let uri = format!("/api/quests/{quest_id}/complete");
    let (status, body) = app.send(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quest"]["isCompleted"], true);

    let (status, _) = app.send(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, active) = app.send(Method::GET, "/api/quests/active", Some(&token), None).await;
    assert_eq!(active["data"].as_array().unwrap().len(), 4);

    let (status, _) = app
        .send(Method::POST, "/api/quests/not-a-uuid/complete", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_game_flow_and_daily_limit() {
    let app = app();
    let token = app.login(13).await;

    let (status, body) = app
        .send(Method::POST, "/api/games/start", Some(&token), Some(json!({ "gameType": "puzzle" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["maxDuration"], 90_000);

    let end = json!({ "gameType": "puzzle", "score": 150, "result": "win", "duration": 45_000 });
    let (status, body) = app.send(Method::POST, "/api/games/end", Some(&token), Some(end.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rewards"]["gold"], 121);
    assert_eq!(body["data"]["rewards"]["experience"], 60);

    for _ in 0..4 {
        let (status, _) = app.send(Method::POST, "/api/games/end", Some(&token), Some(end.clone())).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.send(Method::POST, "/api/games/end", Some(&token), Some(end)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "LIMIT_EXCEEDED");

    let (_, stats) = app.send(Method::GET, "/api/games/stats", Some(&token), None).await;
    assert_eq!(stats["data"]["gamesPlayed"], 5);
    assert_eq!(stats["data"]["gamesRemaining"], 0);
}

#[tokio::test]
async fn test_end_game_rejects_long_session() {
    let app = app();
    let token = app.login(14).await;

    let end = json!({ "gameType": "clicker", "score": 1, "result": "loss", "duration": 3_600_001 });
    let (status, body) = app.send(Method::POST, "/api/games/end", Some(&token), Some(end)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "duration");
}

#[tokio::test]
async fn test_leaderboard_endpoints() {
    let app = app();
    let token = app.login(15).await;

    let (status, body) = app.send(Method::GET, "/api/leaderboard/rank", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    let (status, body) = app.send(Method::GET, "/api/leaderboard/season", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["seasonNumber"].as_u64().unwrap() >= 1);

    let (status, body) = app.send(Method::GET, "/api/leaderboard/top?limit=10", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_character_routes_use_selected_character() {
    let app = app();
    let token = app.login(16).await;

    let (status, body) = app.send(Method::GET, "/api/character", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["class"], "warrior");
    let strength = body["data"]["stats"]["strength"].as_u64().unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/character/stats",
            Some(&token),
            Some(json!({ "stat": "strength", "amount": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stats"]["strength"].as_u64().unwrap(), strength + 3);

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/character/appearance",
            Some(&token),
            Some(json!({ "hairColor": "#000000", "customization": { "hat": "wizard" } })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["appearance"]["hairColor"], "#000000");
    assert_eq!(body["data"]["appearance"]["skinColor"], "#FDBCB4");

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/character/appearance",
            Some(&token),
            Some(json!({ "eyeColor": "blue" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
