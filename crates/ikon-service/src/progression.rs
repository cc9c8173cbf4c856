//! Shared user mutation helpers.

use chrono::{DateTime, Utc};
use ikon_core::domain::User;
use ikon_core::{IkonError, IkonResult, UserId};
use ikon_repository::{CharacterRepository, UserRepository};
use tracing::{debug, warn};

/// Attempts made by [`mutate_user`] before giving up with `Conflict`.
pub(crate) const MAX_UPDATE_ATTEMPTS: u32 = 3;

/// Loads a user, applies `apply` and persists it with an optimistic
/// version check, re-reading and retrying on a concurrent write.
pub(crate) async fn mutate_user<T, F>(users: &dyn UserRepository, user_id: UserId, mut apply: F) -> IkonResult<(User, T)>
where
    F: FnMut(&mut User) -> IkonResult<T> + Send,
    T: Send,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let mut user = users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| IkonError::not_found("User", user_id))?;

        let outcome = apply(&mut user)?;

        match users.update(&user).await {
            Ok(saved) => return Ok((saved, outcome)),
            Err(e) if e.is_conflict() && attempt < MAX_UPDATE_ATTEMPTS => {
                debug!(%user_id, attempt, "Concurrent user update, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Levels up the user's selected character once per level the user gained.
///
/// The user update is already committed at this point, so a failure here
/// is logged rather than returned.
pub(crate) async fn level_up_selected_character(
    characters: &dyn CharacterRepository,
    user: &User,
    levels_gained: u32,
    now: DateTime<Utc>,
) {
    let Some(character_id) = user.selected_character_id else {
        return;
    };
    if levels_gained == 0 {
        return;
    }

    let result: IkonResult<()> = async {
        let Some(mut character) = characters.find_by_id(character_id).await? else {
            return Ok(());
        };
        for _ in 0..levels_gained {
            character.level_up(now);
        }
        characters.update(&character).await.map(|_| ())
    }
    .await;

    if let Err(e) = result {
        warn!(user_id = %user.id, %character_id, "Failed to level up selected character: {}", e);
    }
}
