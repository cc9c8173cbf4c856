//! Character service implementation.

use crate::character_service::CharacterService;
use crate::dto::{
    CharacterResponse, CreateCharacterRequest, CustomizeAppearanceRequest, EquipItemRequest, UpgradeStatRequest,
};
use async_trait::async_trait;
use chrono::Utc;
use ikon_core::domain::Character;
use ikon_core::{CharacterId, IkonError, IkonResult, UserId, ValidateExt};
use ikon_repository::{CharacterRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Character service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = CharacterService)]
pub struct CharacterServiceComponent {
    #[shaku(inject)]
    character_repository: Arc<dyn CharacterRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
}

impl CharacterServiceComponent {
    /// Creates a new character service.
    pub fn new(character_repository: Arc<dyn CharacterRepository>, user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            character_repository,
            user_repository,
        }
    }

    async fn owned(&self, user_id: UserId, id: CharacterId) -> IkonResult<Character> {
        self.character_repository
            .find_by_id(id)
            .await?
            .filter(|c| c.user_id == user_id)
            .ok_or_else(|| IkonError::not_found("Character", id))
    }

    async fn modify<F>(&self, user_id: UserId, id: CharacterId, apply: F) -> IkonResult<CharacterResponse>
    where
        F: FnOnce(&mut Character) -> IkonResult<()> + Send,
    {
        let mut character = self.owned(user_id, id).await?;
        apply(&mut character)?;
        let updated = self.character_repository.update(&character).await?;
        Ok(CharacterResponse::from(updated))
    }
}

#[async_trait]
impl CharacterService for CharacterServiceComponent {
    async fn create_character(&self, user_id: UserId, request: CreateCharacterRequest) -> IkonResult<CharacterResponse> {
        request.validate_request()?;

        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(IkonError::not_found("User", user_id));
        }

        let character = Character::new(user_id, request.name.trim(), request.character_class, Utc::now());
        let saved = self.character_repository.save(&character).await?;

        info!(%user_id, character_id = %saved.id, class = %saved.class, "Character created");
        Ok(CharacterResponse::from(saved))
    }

    async fn get_character(&self, user_id: UserId, id: CharacterId) -> IkonResult<CharacterResponse> {
        debug!("Getting character {} for user {}", id, user_id);
        self.owned(user_id, id).await.map(CharacterResponse::from)
    }

    async fn get_selected_character(&self, user_id: UserId) -> IkonResult<CharacterResponse> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| IkonError::not_found("User", user_id))?;

        if let Some(id) = user.selected_character_id {
            if let Ok(character) = self.owned(user_id, id).await {
                return Ok(CharacterResponse::from(character));
            }
        }

        // fall back to the oldest character
        self.character_repository
            .find_by_user(user_id)
            .await?
            .into_iter()
            .next()
            .map(CharacterResponse::from)
            .ok_or_else(|| IkonError::not_found("Character", user_id))
    }

    async fn level_up_character(&self, user_id: UserId, id: CharacterId) -> IkonResult<CharacterResponse> {
        let now = Utc::now();
        let response = self
            .modify(user_id, id, |c| {
                c.level_up(now);
                Ok(())
            })
            .await?;

        info!(character_id = %id, level = response.level, "Character leveled up");
        Ok(response)
    }

    async fn upgrade_character_stat(
        &self,
        user_id: UserId,
        id: CharacterId,
        request: UpgradeStatRequest,
    ) -> IkonResult<CharacterResponse> {
        request.validate_request()?;
        let now = Utc::now();

        debug!(character_id = %id, stat = ?request.stat, amount = request.amount, "Upgrading stat");
        self.modify(user_id, id, |c| c.upgrade_stat(request.stat, request.amount, now))
            .await
    }

    async fn equip_item(&self, user_id: UserId, id: CharacterId, request: EquipItemRequest) -> IkonResult<CharacterResponse> {
        request.validate_request()?;
        let now = Utc::now();
        let slot = request.slot;

        debug!(character_id = %id, ?slot, item_id = %request.item_id, "Equipping item");
        self.modify(user_id, id, |c| {
            c.equip(slot, request.into(), now);
            Ok(())
        })
        .await
    }

    async fn customize_appearance(
        &self,
        user_id: UserId,
        id: CharacterId,
        request: CustomizeAppearanceRequest,
    ) -> IkonResult<CharacterResponse> {
        request.validate_request()?;
        let now = Utc::now();

        self.modify(user_id, id, |c| {
            c.customize(request.into(), now);
            Ok(())
        })
        .await
    }
}

impl std::fmt::Debug for CharacterServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterServiceComponent").finish_non_exhaustive()
    }
}
