//! Auth service implementation.

use crate::auth_service::AuthService;
use crate::dto::{AuthResponse, UserResponse};
use async_trait::async_trait;
use ikon_core::{IkonError, IkonResult};
use ikon_repository::UserRepository;
use ikon_security::TokenProviderInterface;
use shaku::Component;
use std::sync::Arc;
use tracing::info;

/// Auth service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = AuthService)]
pub struct AuthServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthServiceComponent {
    /// Creates a new auth service.
    pub fn new(user_repository: Arc<dyn UserRepository>, token_provider: Arc<dyn TokenProviderInterface>) -> Self {
        Self {
            user_repository,
            token_provider,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceComponent {
    async fn init(&self, telegram_id: i64) -> IkonResult<AuthResponse> {
        let user = self
            .user_repository
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or_else(|| IkonError::not_found("User", telegram_id))?;

        let token = self.token_provider.generate_access_token(user.id, user.telegram_id)?;

        info!(user_id = %user.id, telegram_id, "Mini App session issued");
        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token: token.access_token,
            token_type: token.token_type,
            expires_at: token.expires_at,
        })
    }
}

impl std::fmt::Debug for AuthServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use ikon_config::SecurityConfig;
    use ikon_core::domain::{TelegramProfile, User};
    use ikon_core::UserId;
    use ikon_repository::InMemoryUserRepository;
    use ikon_security::{Claims, IssuedToken, TokenProvider};
    use mockall::mock;

    mock! {
        Tokens {}

        impl TokenProviderInterface for Tokens {
            fn generate_access_token(&self, user_id: UserId, telegram_id: i64) -> IkonResult<IssuedToken>;
            fn validate_access_token(&self, token: &str) -> IkonResult<Claims>;
        }
    }

    async fn users_with(telegram_id: i64) -> (Arc<InMemoryUserRepository>, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::from_telegram(&TelegramProfile::new(telegram_id, "Ash"), Utc::now());
        let user = users.save(&user).await.unwrap();
        (users, user)
    }

    #[tokio::test]
    async fn test_init_issues_token_for_known_user() {
        let (users, user) = users_with(77).await;
        let expires_at = Utc::now() + Duration::days(30);

        let mut tokens = MockTokens::new();
        let expected_id = user.id;
        tokens
            .expect_generate_access_token()
            .withf(move |id, telegram_id| *id == expected_id && *telegram_id == 77)
            .times(1)
            .returning(move |_, _| {
                Ok(IssuedToken {
                    access_token: "signed".to_string(),
                    token_type: "Bearer".to_string(),
                    expires_at,
                })
            });

        let service = AuthServiceComponent::new(users, Arc::new(tokens));
        let response = service.init(77).await.unwrap();

        assert_eq!(response.user.id, user.id);
        assert_eq!(response.access_token, "signed");
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_at, expires_at);
    }

    #[tokio::test]
    async fn test_init_unknown_user_is_not_found() {
        let (users, _) = users_with(77).await;
        let mut tokens = MockTokens::new();
        tokens.expect_generate_access_token().never();

        let service = AuthServiceComponent::new(users, Arc::new(tokens));
        let err = service.init(78).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_issued_token_validates() {
        let (users, user) = users_with(5).await;
        let provider = Arc::new(TokenProvider::new(SecurityConfig::default()));
        let service = AuthServiceComponent::new(users, provider.clone());

        let response = service.init(5).await.unwrap();
        let claims = provider.validate_access_token(&response.access_token).unwrap();
        assert_eq!(claims.user_id, user.id.into_inner());
        assert_eq!(claims.telegram_id, 5);
    }
}
