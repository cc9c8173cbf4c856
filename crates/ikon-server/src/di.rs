//! Dependency injection modules using Shaku.
//!
//! - `MySqlModule`: MySQL-backed repositories behind a shared pool
//! - `MemoryModule`: in-memory repositories (`memory://`), for local runs and tests
//!
//! Both modules expose the same services; [`ServiceResolver`] lets the rest
//! of the server stay generic over the backend.

use ikon_config::{DatabaseConfig, SecurityConfig};
use ikon_core::IkonResult;
use ikon_repository::{
    DatabasePool, DatabasePoolInterface, InMemoryCharacterRepository, InMemoryGameSessionRepository,
    InMemoryLeaderboardRepository, InMemoryQuestRepository, InMemoryUserRepository, MySqlCharacterRepository,
    MySqlGameSessionRepository, MySqlLeaderboardRepository, MySqlQuestRepository, MySqlUserRepository,
};
use ikon_security::{TokenProvider, TokenProviderInterface};
use ikon_service::{
    AuthService, AuthServiceComponent, CharacterService, CharacterServiceComponent, GameService,
    GameServiceComponent, LeaderboardService, LeaderboardServiceComponent, QuestService, QuestServiceComponent,
    UserService, UserServiceComponent,
};
use shaku::{module, HasComponent};
use std::sync::Arc;

module! {
    pub MySqlModule {
        components = [
            DatabasePool,
            TokenProvider,
            MySqlUserRepository,
            MySqlCharacterRepository,
            MySqlQuestRepository,
            MySqlGameSessionRepository,
            MySqlLeaderboardRepository,
            UserServiceComponent,
            CharacterServiceComponent,
            QuestServiceComponent,
            GameServiceComponent,
            LeaderboardServiceComponent,
            AuthServiceComponent,
        ],
        providers = [],
    }
}

module! {
    pub MemoryModule {
        components = [
            TokenProvider,
            InMemoryUserRepository,
            InMemoryCharacterRepository,
            InMemoryQuestRepository,
            InMemoryGameSessionRepository,
            InMemoryLeaderboardRepository,
            UserServiceComponent,
            CharacterServiceComponent,
            QuestServiceComponent,
            GameServiceComponent,
            LeaderboardServiceComponent,
            AuthServiceComponent,
        ],
        providers = [],
    }
}

/// Connects to MySQL and builds the module around the pool.
pub async fn build_mysql_module(
    db_config: &DatabaseConfig,
    security_config: SecurityConfig,
) -> IkonResult<Arc<MySqlModule>> {
    let db_pool = DatabasePool::new(db_config).await?;

    let module = MySqlModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePool::parameters(db_pool.inner().clone()))
        .with_component_parameters::<TokenProvider>(TokenProvider::parameters(security_config))
        .build();

    Ok(Arc::new(module))
}

/// Builds the in-memory module. State lives as long as the module.
#[must_use]
pub fn build_memory_module(security_config: SecurityConfig) -> Arc<MemoryModule> {
    let module = MemoryModule::builder()
        .with_component_parameters::<TokenProvider>(TokenProvider::parameters(security_config))
        .build();

    Arc::new(module)
}

/// Resolves the services every entry point needs, whatever the backend.
pub trait ServiceResolver: Send + Sync {
    fn user_service(&self) -> Arc<dyn UserService>;

    fn character_service(&self) -> Arc<dyn CharacterService>;

    fn quest_service(&self) -> Arc<dyn QuestService>;

    fn game_service(&self) -> Arc<dyn GameService>;

    fn leaderboard_service(&self) -> Arc<dyn LeaderboardService>;

    fn auth_service(&self) -> Arc<dyn AuthService>;

    fn token_provider(&self) -> Arc<dyn TokenProviderInterface>;
}

impl<M> ServiceResolver for M
where
    M: HasComponent<dyn UserService>
        + HasComponent<dyn CharacterService>
        + HasComponent<dyn QuestService>
        + HasComponent<dyn GameService>
        + HasComponent<dyn LeaderboardService>
        + HasComponent<dyn AuthService>
        + HasComponent<dyn TokenProviderInterface>
        + Send
        + Sync,
{
    fn user_service(&self) -> Arc<dyn UserService> {
        HasComponent::<dyn UserService>::resolve(self)
    }

    fn character_service(&self) -> Arc<dyn CharacterService> {
        HasComponent::<dyn CharacterService>::resolve(self)
    }

    fn quest_service(&self) -> Arc<dyn QuestService> {
        HasComponent::<dyn QuestService>::resolve(self)
    }

    fn game_service(&self) -> Arc<dyn GameService> {
        HasComponent::<dyn GameService>::resolve(self)
    }

    fn leaderboard_service(&self) -> Arc<dyn LeaderboardService> {
        HasComponent::<dyn LeaderboardService>::resolve(self)
    }

    fn auth_service(&self) -> Arc<dyn AuthService> {
        HasComponent::<dyn AuthService>::resolve(self)
    }

    fn token_provider(&self) -> Arc<dyn TokenProviderInterface> {
        HasComponent::<dyn TokenProviderInterface>::resolve(self)
    }
}

/// Resolves the pool from modules that have one.
pub trait DatabaseResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for MySqlModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikon_core::domain::TelegramProfile;
    use ikon_core::IkonError;
    use ikon_repository::UserRepository;

    #[test]
    fn test_module_types_exist() {
        fn _assert_service_resolver<T: ServiceResolver>() {}
        fn _assert_database_resolver<T: DatabaseResolver>() {}
        fn _assert_has_user_repository<T: HasComponent<dyn UserRepository>>() {}

        _assert_service_resolver::<MySqlModule>();
        _assert_service_resolver::<MemoryModule>();
        _assert_database_resolver::<MySqlModule>();
        _assert_has_user_repository::<MySqlModule>();
        _assert_has_user_repository::<MemoryModule>();
    }

    #[tokio::test]
    async fn test_memory_module_shares_repositories_between_services() {
        let module = build_memory_module(SecurityConfig::default());

        let user = module
            .user_service()
            .create_or_update_user(&TelegramProfile::new(1001, "Ada"))
            .await
            .unwrap();

        let auth = module.auth_service().init(1001).await.unwrap();
        assert_eq!(auth.user.id, user.id);

        let claims = module.token_provider().validate_access_token(&auth.access_token).unwrap();
        assert_eq!(claims.user_id(), user.id);

        let character = module.character_service().get_selected_character(user.id).await.unwrap();
        assert_eq!(Some(character.id), user.selected_character_id);
    }

    #[tokio::test]
    async fn test_memory_module_uses_configured_secret() {
        let module = build_memory_module(SecurityConfig {
            jwt_secret: "module-secret-with-enough-length-123".to_string(),
            ..SecurityConfig::default()
        });
        let other = build_memory_module(SecurityConfig::default());

        module
            .user_service()
            .create_or_update_user(&TelegramProfile::new(7, "Lin"))
            .await
            .unwrap();
        let token = module.auth_service().init(7).await.unwrap().access_token;

        let err = other.token_provider().validate_access_token(&token).unwrap_err();
        assert!(matches!(err, IkonError::InvalidToken(_)));
    }
}
