mod summary;
mod telegram;
mod templates;

pub use summary::SummaryReport;
pub use telegram::TelegramChannel;

use async_trait::async_trait;

/// Trait for notification channels.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotificationError>;
    fn name(&self) -> &str;
}

/// Errors from the notification system.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Telegram API error: {0}")]
    Telegram(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Configuration for the notification service.
#[derive(Debug, Clone, Default)]
pub struct NotificationConfig {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl NotificationConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            telegram_bot_token: get("TELEGRAM_BOT_TOKEN").filter(|s| !s.is_empty()),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").filter(|s| !s.is_empty()),
        }
    }

    pub fn telegram_configured(&self) -> bool {
        self.telegram_bot_token.is_some() && self.telegram_chat_id.is_some()
    }
}

/// Dispatches summaries to all configured channels.
pub struct NotificationService {
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl NotificationService {
    pub fn new(config: &NotificationConfig) -> Self {
        let mut channels: Vec<Box<dyn NotificationChannel>> = Vec::new();

        match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(token), Some(chat_id)) => match TelegramChannel::new(token, chat_id) {
                Ok(channel) => {
                    tracing::info!("Telegram notifications enabled");
                    channels.push(Box::new(channel));
                }
                Err(e) => {
                    tracing::warn!("Failed to initialize Telegram channel: {}", e);
                }
            },
            _ => {
                tracing::info!(
                    "Telegram not configured (set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID)"
                );
            }
        }

        Self { channels }
    }

    pub fn with_channel(mut self, channel: Box<dyn NotificationChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Send to every channel, awaiting completion. Failures are logged, never
    /// returned; the result is the number of channels that accepted the text.
    pub async fn broadcast(&self, text: &str) -> usize {
        let mut delivered = 0;
        for channel in &self.channels {
            match channel.send(text).await {
                Ok(()) => {
                    tracing::debug!("Sent notification via {}", channel.name());
                    delivered += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to send notification via {}: {}", channel.name(), e)
                }
            }
        }
        delivered
    }

    /// Render the summary as Markdown and broadcast it.
    pub async fn send_summary(&self, report: &SummaryReport<'_>) -> usize {
        self.broadcast(&report.render_markdown()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingChannel {
        sent: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl NotificationChannel for CountingChannel {
        async fn send(&self, _text: &str) -> Result<(), NotificationError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotificationError::Telegram("boom".into()))
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_unconfigured_service_has_no_channels() {
        let service = NotificationService::new(&NotificationConfig::default());
        assert_eq!(service.channel_count(), 0);

        let half = NotificationConfig {
            telegram_bot_token: Some("token".into()),
            telegram_chat_id: None,
        };
        assert!(!half.telegram_configured());
        assert_eq!(NotificationService::new(&half).channel_count(), 0);
    }

    #[test]
    fn test_from_lookup_ignores_empty_values() {
        let config = NotificationConfig::from_lookup(|key| match key {
            "TELEGRAM_BOT_TOKEN" => Some("123:abc".to_string()),
            "TELEGRAM_CHAT_ID" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.telegram_bot_token.as_deref(), Some("123:abc"));
        assert!(config.telegram_chat_id.is_none());
    }

    #[test]
    fn test_configured_service_registers_telegram() {
        let config = NotificationConfig {
            telegram_bot_token: Some("123:abc".into()),
            telegram_chat_id: Some("42".into()),
        };
        assert!(config.telegram_configured());
        assert_eq!(NotificationService::new(&config).channel_count(), 1);
    }

    #[tokio::test]
    async fn test_broadcast_swallows_failures() {
        let sent = Arc::new(AtomicUsize::new(0));
        let service = NotificationService::new(&NotificationConfig::default())
            .with_channel(Box::new(CountingChannel {
                sent: sent.clone(),
                fail: true,
            }))
            .with_channel(Box::new(CountingChannel {
                sent: sent.clone(),
                fail: false,
            }));

        let delivered = service.broadcast("hello").await;
        assert_eq!(delivered, 1);
        // The failing channel does not stop the next one
        assert_eq!(sent.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_broadcast_with_no_channels() {
        let service = NotificationService::new(&NotificationConfig::default());
        assert_eq!(service.broadcast("hello").await, 0);
    }
}
