//! JWT claims structure.

use chrono::{DateTime, Utc};
use ikon_core::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    /// User ID as UUID.
    pub user_id: Uuid,

    /// Telegram account the user signed in with.
    pub telegram_id: i64,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Not before timestamp.
    pub nbf: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,

    /// JWT ID (unique identifier for this token).
    pub jti: String,
}

impl Claims {
    /// Creates access token claims.
    #[must_use]
    pub fn new_access(
        user_id: UserId,
        telegram_id: i64,
        issuer: String,
        audience: String,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            user_id: user_id.into_inner(),
            telegram_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            nbf: issued_at.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Returns the user ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    /// Checks if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_access_claims() {
        let user_id = UserId::new();
        let now = Utc::now();
        let claims = Claims::new_access(
            user_id,
            42,
            "issuer".to_string(),
            "audience".to_string(),
            now,
            now + Duration::hours(1),
        );

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.nbf, claims.iat);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_serialize_camel_case() {
        let now = Utc::now();
        let claims = Claims::new_access(UserId::new(), 7, "i".into(), "a".into(), now, now);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["telegramId"], 7);
        assert!(json.get("userId").is_some());
    }
}
