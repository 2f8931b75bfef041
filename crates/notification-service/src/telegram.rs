use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::{NotificationChannel, NotificationError};

const TELEGRAM_API: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram Bot API `sendMessage` channel.
pub struct TelegramChannel {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramChannel {
    pub fn new(token: &str, chat_id: &str) -> Result<Self, NotificationError> {
        if token.is_empty() || chat_id.is_empty() {
            return Err(NotificationError::Config(
                "Telegram bot token and chat id are required".to_string(),
            ));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: TELEGRAM_API.to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    /// Point the channel at another API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.token)
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    async fn send(&self, text: &str) -> Result<(), NotificationError> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Telegram(format!("{}: {}", status, body)));
        }

        tracing::debug!("Telegram notification sent");
        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
