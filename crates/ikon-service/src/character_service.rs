//! Character service trait definition.

use crate::dto::{
    CharacterResponse, CreateCharacterRequest, CustomizeAppearanceRequest, EquipItemRequest, UpgradeStatRequest,
};
use async_trait::async_trait;
use ikon_core::{CharacterId, IkonResult, Interface, UserId};

/// Character management.
///
/// Every operation is scoped to the calling user; a character owned by
/// someone else is reported as not found.
#[async_trait]
pub trait CharacterService: Interface + Send + Sync {
    /// Creates a level 1 character from its class template.
    async fn create_character(&self, user_id: UserId, request: CreateCharacterRequest) -> IkonResult<CharacterResponse>;

    /// Gets one of the user's characters.
    async fn get_character(&self, user_id: UserId, id: CharacterId) -> IkonResult<CharacterResponse>;

    /// Gets the user's selected character.
    async fn get_selected_character(&self, user_id: UserId) -> IkonResult<CharacterResponse>;

    /// Advances a character one level.
    async fn level_up_character(&self, user_id: UserId, id: CharacterId) -> IkonResult<CharacterResponse>;

    /// Raises one attribute.
    async fn upgrade_character_stat(
        &self,
        user_id: UserId,
        id: CharacterId,
        request: UpgradeStatRequest,
    ) -> IkonResult<CharacterResponse>;

    /// Puts an item into an equipment slot.
    async fn equip_item(&self, user_id: UserId, id: CharacterId, request: EquipItemRequest) -> IkonResult<CharacterResponse>;

    /// Applies a partial appearance change.
    async fn customize_appearance(
        &self,
        user_id: UserId,
        id: CharacterId,
        request: CustomizeAppearanceRequest,
    ) -> IkonResult<CharacterResponse>;
}
