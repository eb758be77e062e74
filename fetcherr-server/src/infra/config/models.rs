use std::{fmt, path::PathBuf, time::Duration};

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub discord: DiscordConfig,
    pub overseerr: OverseerrConfig,
    pub interactions: InteractionConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct DiscordConfig {
    pub application_id: String,
    /// Hex-encoded Ed25519 key from the developer portal.
    pub public_key: String,
    pub bot_token: Option<String>,
    /// Only channel `/search` is accepted in. `None` accepts every channel.
    pub channel_id: Option<u64>,
    /// Registers commands per guild instead of globally.
    pub guild_id: Option<String>,
    pub api_base: String,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("application_id", &self.application_id)
            .field("public_key", &self.public_key)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("channel_id", &self.channel_id)
            .field("guild_id", &self.guild_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Clone)]
pub struct OverseerrConfig {
    pub url: String,
    pub api_key: String,
}

impl fmt::Debug for OverseerrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverseerrConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionConfig {
    pub affordance_timeout: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
