//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{DateTime, Duration, Utc};
use ikon_config::SecurityConfig;
use ikon_core::{IkonError, IkonResult, Interface, UserId};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shaku::Component;
use tracing::{debug, warn};

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub access_token: String,
    /// Always "Bearer".
    pub token_type: String,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies bearer tokens.
pub trait TokenProviderInterface: Interface + Send + Sync {
    /// Issues an access token for a user.
    fn generate_access_token(&self, user_id: UserId, telegram_id: i64) -> IkonResult<IssuedToken>;

    /// Verifies signature, issuer, audience and lifetime of an access token.
    fn validate_access_token(&self, token: &str) -> IkonResult<Claims>;
}

/// JWT token provider (HS256).
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    config: SecurityConfig,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: SecurityConfig) -> Self {
        Self { config }
    }

    /// Shaku parameters for registering the provider in a module.
    #[must_use]
    pub fn parameters(config: SecurityConfig) -> TokenProviderParameters {
        TokenProviderParameters { config }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.jwt_issuer]);
        validation.set_audience(&[&self.config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation
    }

    fn lifetime(&self) -> Duration {
        Duration::seconds(i64::try_from(self.config.jwt_expiration_secs).unwrap_or(i64::MAX / 1_000))
    }
}

impl TokenProviderInterface for TokenProvider {
    fn generate_access_token(&self, user_id: UserId, telegram_id: i64) -> IkonResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.lifetime();

        let claims = Claims::new_access(
            user_id,
            telegram_id,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            now,
            expires_at,
        );

        let key = EncodingKey::from_secret(self.config.jwt_secret.as_bytes());
        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| IkonError::Internal(format!("Failed to generate access token: {}", e)))?;

        debug!("Generated access token for user {}", user_id);
        Ok(IssuedToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_at,
        })
    }

    fn validate_access_token(&self, token: &str) -> IkonResult<Claims> {
        let key = DecodingKey::from_secret(self.config.jwt_secret.as_bytes());
        let token_data = decode::<Claims>(token, &key, &self.validation()).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => IkonError::TokenExpired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                    IkonError::InvalidToken("Invalid token signature".to_string())
                }
                ErrorKind::InvalidIssuer => IkonError::InvalidToken("Invalid token issuer".to_string()),
                ErrorKind::InvalidAudience => IkonError::InvalidToken("Invalid token audience".to_string()),
                _ => IkonError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
