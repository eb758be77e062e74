use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub discord: FileDiscordConfig,
    #[serde(default)]
    pub overseerr: FileOverseerrConfig,
    #[serde(default)]
    pub interactions: FileInteractionConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDiscordConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileOverseerrConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileInteractionConfig {
    /// Human-readable duration such as `"2m"` or `"90s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordance_timeout: Option<String>,
}

/// Environment-derived configuration values.
///
/// Values are kept as raw strings; the loader owns parsing so bad input
/// surfaces as a [`super::ConfigLoadError`] instead of being ignored.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<String>,
    pub discord_application_id: Option<String>,
    pub discord_public_key: Option<String>,
    pub discord_bot_token: Option<String>,
    pub discord_channel_id: Option<String>,
    pub discord_guild_id: Option<String>,
    pub discord_api_base: Option<String>,
    pub overseerr_url: Option<String>,
    pub overseerr_api_key: Option<String>,
    pub affordance_timeout: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the environment view from an arbitrary lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            config_path: var("FETCHERR_CONFIG").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: var("SERVER_PORT"),
            discord_application_id: var("DISCORD_APPLICATION_ID"),
            discord_public_key: var("DISCORD_PUBLIC_KEY"),
            discord_bot_token: var("DISCORD_BOT_TOKEN"),
            discord_channel_id: var("DISCORD_CHANNEL_ID"),
            discord_guild_id: var("DISCORD_GUILD_ID"),
            discord_api_base: var("DISCORD_API_BASE"),
            overseerr_url: var("OVERSEERR_URL"),
            overseerr_api_key: var("OVERSEERR_API_KEY"),
            affordance_timeout: var("AFFORDANCE_TIMEOUT"),
        }
    }
}
