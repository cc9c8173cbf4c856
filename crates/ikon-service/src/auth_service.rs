//! Authentication service trait definition.

use crate::dto::AuthResponse;
use async_trait::async_trait;
use ikon_core::{IkonResult, Interface};

/// Mini App session bootstrap.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Issues a bearer token for a registered Telegram user.
    ///
    /// Users register through the bot; an unknown Telegram ID is `NotFound`.
    async fn init(&self, telegram_id: i64) -> IkonResult<AuthResponse>;
}
