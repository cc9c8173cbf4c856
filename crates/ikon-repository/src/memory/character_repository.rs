//! In-memory character repository.

use crate::traits::CharacterRepository;
use async_trait::async_trait;
use ikon_core::domain::Character;
use ikon_core::{CharacterId, IkonError, IkonResult, UserId};
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;

/// In-memory character repository.
#[derive(Component, Default, Debug)]
#[shaku(interface = CharacterRepository)]
pub struct InMemoryCharacterRepository {
    #[shaku(default)]
    characters: RwLock<HashMap<CharacterId, Character>>,
}

impl InMemoryCharacterRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepository {
    async fn find_by_id(&self, id: CharacterId) -> IkonResult<Option<Character>> {
        Ok(self.characters.read().get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> IkonResult<Vec<Character>> {
        let mut owned: Vec<Character> = self
            .characters
            .read()
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|c| c.created_at);
        Ok(owned)
    }

    async fn save(&self, character: &Character) -> IkonResult<Character> {
        let mut characters = self.characters.write();
        if characters.contains_key(&character.id) {
            return Err(IkonError::conflict(format!("Character {} already exists", character.id)));
        }
        characters.insert(character.id, character.clone());
        Ok(character.clone())
    }

    async fn update(&self, character: &Character) -> IkonResult<Character> {
        let mut characters = self.characters.write();
        let stored = characters
            .get_mut(&character.id)
            .ok_or_else(|| IkonError::not_found("Character", character.id))?;
        *stored = character.clone();
        Ok(character.clone())
    }
}
