//! Outbound calls to the Discord REST API.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use super::{commands::CommandDefinition, response::MessagePayload};

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Discord API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("a bot token is required for {0}")]
    MissingBotToken(&'static str),
}

/// Delivers followup messages for interactions that were deferred.
#[async_trait]
pub trait FollowupSink: Send + Sync {
    async fn send(
        &self,
        interaction_token: &str,
        message: &MessagePayload,
    ) -> Result<(), DiscordError>;
}

#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    api_base: String,
    application_id: String,
    bot_token: Option<String>,
}

impl fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordClient")
            .field("api_base", &self.api_base)
            .field("application_id", &self.application_id)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl DiscordClient {
    pub fn new(
        api_base: impl Into<String>,
        application_id: impl Into<String>,
        bot_token: Option<String>,
    ) -> Result<Self, DiscordError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("fetcherr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            application_id: application_id.into(),
            bot_token,
        })
    }

    /// Replaces the application's commands, globally or for one guild.
    /// Returns how many commands Discord now has registered.
    pub async fn register_commands(
        &self,
        guild_id: Option<&str>,
        commands: &[CommandDefinition],
    ) -> Result<usize, DiscordError> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or(DiscordError::MissingBotToken("command registration"))?;

        let url = match guild_id {
            Some(guild) => format!(
                "{}/applications/{}/guilds/{guild}/commands",
                self.api_base, self.application_id
            ),
            None => format!(
                "{}/applications/{}/commands",
                self.api_base, self.application_id
            ),
        };

        let response = self
            .http
            .put(&url)
            .header("Authorization", format!("Bot {token}"))
            .json(commands)
            .send()
            .await?;
        let registered: Vec<serde_json::Value> =
            ensure_success(response).await?.json().await?;
        Ok(registered.len())
    }
}

#[async_trait]
impl FollowupSink for DiscordClient {
    async fn send(
        &self,
        interaction_token: &str,
        message: &MessagePayload,
    ) -> Result<(), DiscordError> {
        let url = format!(
            "{}/webhooks/{}/{interaction_token}",
            self.api_base, self.application_id
        );
        let response = self.http.post(&url).json(message).send().await?;
        ensure_success(response).await?;
        debug!("followup delivered");
        Ok(())
    }
}

async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, DiscordError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DiscordError::Api {
        status: status.as_u16(),
        body,
    })
}

/// Keeps followups in memory instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct RecordingFollowups {
    sent: Arc<Mutex<Vec<(String, MessagePayload)>>>,
}

impl RecordingFollowups {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<(String, MessagePayload)> {
        self.sent.lock().await.clone()
    }

    /// Polls until at least `count` followups arrived or `timeout` passed.
    pub async fn wait_for(
        &self,
        count: usize,
        timeout: Duration,
    ) -> Vec<(String, MessagePayload)> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let sent = self.sent().await;
            if sent.len() >= count || tokio::time::Instant::now() >= deadline {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl FollowupSink for RecordingFollowups {
    async fn send(
        &self,
        interaction_token: &str,
        message: &MessagePayload,
    ) -> Result<(), DiscordError> {
        self.sent
            .lock()
            .await
            .push((interaction_token.to_string(), message.clone()));
        Ok(())
    }
}
