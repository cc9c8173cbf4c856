//! User service implementation.

use crate::dto::{LoginStreakResponse, UserResponse};
use crate::progression::{level_up_selected_character, mutate_user};
use crate::user_service::UserService;
use async_trait::async_trait;
use chrono::Utc;
use ikon_core::domain::{Character, TelegramProfile, User};
use ikon_core::{IkonError, IkonResult, UserId};
use ikon_repository::{CharacterRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// User service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    character_repository: Arc<dyn CharacterRepository>,
}

impl UserServiceComponent {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>, character_repository: Arc<dyn CharacterRepository>) -> Self {
        Self {
            user_repository,
            character_repository,
        }
    }

    async fn refresh_existing(&self, existing: User, profile: &TelegramProfile) -> IkonResult<UserResponse> {
        let (user, ()) = mutate_user(self.user_repository.as_ref(), existing.id, |u| {
            u.refresh_profile(profile);
            Ok(())
        })
        .await?;

        debug!("Refreshed profile of user {}", user.id);
        Ok(UserResponse::from(user))
    }

    async fn register(&self, profile: &TelegramProfile) -> IkonResult<UserResponse> {
        let now = Utc::now();
        let mut user = User::from_telegram(profile, now);
        let starter = Character::starter(user.id, &user.first_name, now);
        user.selected_character_id = Some(starter.id);

        let saved = match self.user_repository.save(&user).await {
            Ok(saved) => saved,
            Err(e) if e.is_conflict() => {
                // a concurrent /start registered the same Telegram account
                let existing = self
                    .user_repository
                    .find_by_telegram_id(profile.id)
                    .await?
                    .ok_or(e)?;
                return self.refresh_existing(existing, profile).await;
            }
            Err(e) => return Err(e),
        };
        self.character_repository.save(&starter).await?;

        info!(user_id = %saved.id, telegram_id = saved.telegram_id, "New player registered");
        Ok(UserResponse::from(saved))
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn create_or_update_user(&self, profile: &TelegramProfile) -> IkonResult<UserResponse> {
        debug!("Creating or updating user for Telegram ID {}", profile.id);

        match self.user_repository.find_by_telegram_id(profile.id).await? {
            Some(existing) => self.refresh_existing(existing, profile).await,
            None => self.register(profile).await,
        }
    }

    async fn get_user(&self, id: UserId) -> IkonResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| IkonError::not_found("User", id))?;

        Ok(UserResponse::from(user))
    }

    async fn get_user_by_telegram_id(&self, telegram_id: i64) -> IkonResult<UserResponse> {
        debug!("Getting user by Telegram ID: {}", telegram_id);

        let user = self
            .user_repository
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or_else(|| IkonError::not_found("User", telegram_id))?;

        Ok(UserResponse::from(user))
    }

    async fn update_user_experience(&self, id: UserId, amount: i64) -> IkonResult<UserResponse> {
        debug!("Granting {} experience to user {}", amount, id);

        if amount < 0 {
            return Err(IkonError::validation("Experience amount must not be negative"));
        }

        let (user, progress) = mutate_user(self.user_repository.as_ref(), id, |u| u.gain_experience(amount)).await?;

        if progress.levels_gained > 0 {
            info!(user_id = %id, level = user.level, "User leveled up {} time(s)", progress.levels_gained);
            level_up_selected_character(self.character_repository.as_ref(), &user, progress.levels_gained, Utc::now())
                .await;
        }

        Ok(UserResponse::from(user))
    }

    async fn update_user_gold(&self, id: UserId, amount: i64) -> IkonResult<UserResponse> {
        debug!("Adding {} gold to user {}", amount, id);

        let (user, ()) = mutate_user(self.user_repository.as_ref(), id, |u| u.add_gold(amount)).await?;
        Ok(UserResponse::from(user))
    }

    async fn add_login_streak(&self, id: UserId) -> IkonResult<LoginStreakResponse> {
        let now = Utc::now();
        let (user, progress) = mutate_user(self.user_repository.as_ref(), id, |u| u.register_login(now)).await?;

        debug!(user_id = %id, streak = progress.streak, "Login registered");
        Ok(LoginStreakResponse {
            user: UserResponse::from(user),
            streak: progress.streak,
            bonus_gold: progress.bonus_gold,
        })
    }

    async fn list_notification_recipients(&self) -> IkonResult<Vec<i64>> {
        self.user_repository.find_all_telegram_ids().await
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent").finish_non_exhaustive()
    }
}
