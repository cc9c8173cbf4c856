//! Bot API HTTP client.

use crate::types::{
    AnswerCallbackQueryRequest, ApiResponse, GetUpdatesRequest, InlineKeyboardMarkup, SendMessageRequest, Update,
};
use ikon_config::TelegramConfig;
use ikon_core::{IkonError, IkonResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const SERVICE: &str = "telegram";

/// Thin JSON client over the Telegram Bot API.
///
/// Every method is a `POST {api_base_url}/bot{token}/{method}` with a JSON
/// body. The token never appears in logs or errors.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: Url,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// Creates a client from the telegram configuration section.
    pub fn new(config: &TelegramConfig) -> IkonResult<Self> {
        // Long polls hold the connection for poll_timeout_secs.
        let timeout = config
            .request_timeout()
            .max(Duration::from_secs(config.poll_timeout_secs + 5));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IkonError::internal(format!("Failed to create HTTP client: {e}")))?;

        Self::with_client(client, &config.api_base_url, &config.bot_token, config.poll_timeout_secs)
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, api_base_url: &str, token: &str, poll_timeout_secs: u64) -> IkonResult<Self> {
        if token.is_empty() {
            return Err(IkonError::Configuration("telegram.bot_token is empty".to_string()));
        }
        let base_url = Url::parse(&format!("{}/bot{token}/", api_base_url.trim_end_matches('/')))
            .map_err(|e| IkonError::Configuration(format!("Invalid telegram.api_base_url: {e}")))?;

        Ok(Self {
            client,
            base_url,
            poll_timeout_secs,
        })
    }

    fn url(&self, method: &str) -> IkonResult<Url> {
        self.base_url
            .join(method)
            .map_err(|e| IkonError::internal(format!("Invalid Bot API method {method}: {e}")))
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> IkonResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method, "Calling Bot API");

        let response = self
            .client
            .post(self.url(method)?)
            .json(body)
            .send()
            .await
            .map_err(|e| IkonError::external(SERVICE, format!("{method} request failed: {}", e.without_url())))?;

        let status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| IkonError::external(SERVICE, format!("{method} returned HTTP {status}: {}", e.without_url())))?;

        if !envelope.ok {
            let description = envelope.description.unwrap_or_else(|| format!("HTTP {status}"));
            return Err(IkonError::external(SERVICE, format!("{method} failed: {description}")));
        }
        envelope
            .result
            .ok_or_else(|| IkonError::external(SERVICE, format!("{method} returned no result")))
    }

    /// Long-polls for updates starting at `offset`.
    pub async fn get_updates(&self, offset: i64) -> IkonResult<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: &["message", "callback_query"],
        };
        self.call("getUpdates", &request).await
    }

    /// Sends a Markdown message, optionally with an inline keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> IkonResult<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
            reply_markup,
        };
        let _: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }

    /// Acknowledges a callback query so the client stops its spinner.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> IkonResult<()> {
        let request = AnswerCallbackQueryRequest { callback_query_id };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> TelegramConfig {
        TelegramConfig {
            enabled: true,
            bot_token: "123:abc".to_string(),
            api_base_url: base.to_string(),
            ..TelegramConfig::default()
        }
    }

    #[test]
    fn test_method_url_contains_token_path() {
        let client = TelegramClient::new(&config("https://api.telegram.org/")).unwrap();
        let url = client.url("sendMessage").unwrap();
        assert_eq!(url.as_str(), "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut config = config("https://api.telegram.org");
        config.bot_token.clear();
        let err = TelegramClient::new(&config).unwrap_err();
        assert!(matches!(err, IkonError::Configuration(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(&config("https://api.telegram.org")).unwrap();
        assert!(!format!("{client:?}").contains("123:abc"));
    }
}
