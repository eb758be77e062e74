use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use fetcherr_core::DEFAULT_AFFORDANCE_LIFETIME;

use super::{
    models::{
        Config, ConfigMetadata, DiscordConfig, InteractionConfig,
        OverseerrConfig, ServerConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::ConfigWarnings,
};

const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["fetcherr.toml", "config/fetcherr.toml"];

pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// A loaded configuration and whatever was worth warning about.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_from_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Resolves the file layer and composes it with an already gathered
    /// environment.
    pub fn load_from_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            compose_config(file_config, env, config_path, env_file_loaded)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = match (&self.options.config_path, &env.config_path)
        {
            (Some(path), _) | (None, Some(path)) => (path.clone(), true),
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => (path, false),
                None => return Ok((None, None)),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
    env_file_loaded: bool,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No fetcherr.toml detected; falling back to environment variables",
            "Pass --config or set FETCHERR_CONFIG to use a configuration file",
        );
    }

    let FileConfig {
        server: file_server,
        discord: file_discord,
        overseerr: file_overseerr,
        interactions: file_interactions,
    } = file_config.unwrap_or_default();

    let port = match env.server_port {
        Some(raw) => parse_value("SERVER_PORT", &raw, str::parse::<u16>)?,
        None => file_server.port.unwrap_or(8080),
    };
    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string()),
        port,
    };

    let channel_id = match env.discord_channel_id {
        Some(raw) => {
            Some(parse_value("DISCORD_CHANNEL_ID", &raw, str::parse::<u64>)?)
        }
        None => file_discord.channel_id,
    };
    if channel_id.is_none() {
        warnings.push_with_hint(
            "DISCORD_CHANNEL_ID is not set; /search is accepted in every channel",
            "Set DISCORD_CHANNEL_ID to restrict requests to one channel",
        );
    }

    let bot_token = env.discord_bot_token.or(file_discord.bot_token);
    if bot_token.is_none() {
        warnings.push_with_hint(
            "DISCORD_BOT_TOKEN is not set; slash commands cannot be registered",
            "Followups use interaction tokens and keep working without it",
        );
    }

    let discord = DiscordConfig {
        application_id: required(
            "DISCORD_APPLICATION_ID",
            env.discord_application_id.or(file_discord.application_id),
        )?,
        public_key: required(
            "DISCORD_PUBLIC_KEY",
            env.discord_public_key.or(file_discord.public_key),
        )?,
        bot_token,
        channel_id,
        guild_id: env.discord_guild_id.or(file_discord.guild_id),
        api_base: env
            .discord_api_base
            .or(file_discord.api_base)
            .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string()),
    };

    let overseerr = OverseerrConfig {
        url: required("OVERSEERR_URL", env.overseerr_url.or(file_overseerr.url))?,
        api_key: required(
            "OVERSEERR_API_KEY",
            env.overseerr_api_key.or(file_overseerr.api_key),
        )?,
    };

    let affordance_timeout = match env
        .affordance_timeout
        .or(file_interactions.affordance_timeout)
    {
        Some(raw) => parse_timeout(&raw)?,
        None => DEFAULT_AFFORDANCE_LIFETIME,
    };

    let config = Config {
        server,
        discord,
        overseerr,
        interactions: InteractionConfig { affordance_timeout },
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded,
        },
    };

    Ok((config, warnings))
}

fn required(
    key: &'static str,
    value: Option<String>,
) -> Result<String, ConfigLoadError> {
    value.ok_or(ConfigLoadError::Missing { key })
}

fn parse_value<T, E>(
    key: &'static str,
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ConfigLoadError>
where
    E: std::fmt::Display,
{
    parse(raw).map_err(|err| ConfigLoadError::Invalid {
        key,
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let timeout = parse_value("AFFORDANCE_TIMEOUT", raw, humantime::parse_duration)?;
    if timeout.is_zero() {
        return Err(ConfigLoadError::Invalid {
            key: "AFFORDANCE_TIMEOUT",
            value: raw.to_string(),
            reason: "must be longer than zero".to_string(),
        });
    }
    Ok(timeout)
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to load .env file")]
    EnvFile(#[from] dotenvy::Error),
    #[error("{key} is required")]
    Missing { key: &'static str },
    #[error("invalid {key} '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DISCORD_APPLICATION_ID", "1100"),
            ("DISCORD_PUBLIC_KEY", "ab"),
            ("OVERSEERR_URL", "http://overseerr:5055"),
            ("OVERSEERR_API_KEY", "secret"),
        ]
    }

    fn compose(pairs: &[(&str, &str)]) -> Result<ConfigLoad, ConfigLoadError> {
        let (config, warnings) = compose_config(None, env(pairs), None, false)?;
        Ok(ConfigLoad { config, warnings })
    }

    #[test]
    fn defaults_fill_optional_values() {
        let load = compose(&minimal()).expect("config");
        let config = load.config;

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.discord.channel_id, None);
        assert_eq!(config.discord.api_base, DEFAULT_DISCORD_API_BASE);
        assert_eq!(
            config.interactions.affordance_timeout,
            Duration::from_secs(120)
        );
        // no file, no channel restriction, no bot token
        assert_eq!(load.warnings.items.len(), 3);
    }

    #[test]
    fn missing_required_key_is_named() {
        let pairs: Vec<_> = minimal()
            .into_iter()
            .filter(|(key, _)| *key != "OVERSEERR_API_KEY")
            .collect();

        match compose(&pairs) {
            Err(ConfigLoadError::Missing { key }) => {
                assert_eq!(key, "OVERSEERR_API_KEY")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn blank_values_count_as_unset() {
        let mut pairs = minimal();
        pairs.push(("DISCORD_CHANNEL_ID", "   "));
        let load = compose(&pairs).expect("config");
        assert_eq!(load.config.discord.channel_id, None);
    }

    #[test]
    fn malformed_numbers_and_durations_are_rejected() {
        let mut pairs = minimal();
        pairs.push(("DISCORD_CHANNEL_ID", "general"));
        assert!(matches!(
            compose(&pairs),
            Err(ConfigLoadError::Invalid {
                key: "DISCORD_CHANNEL_ID",
                ..
            })
        ));

        let mut pairs = minimal();
        pairs.push(("AFFORDANCE_TIMEOUT", "soon"));
        assert!(matches!(
            compose(&pairs),
            Err(ConfigLoadError::Invalid {
                key: "AFFORDANCE_TIMEOUT",
                ..
            })
        ));

        let mut pairs = minimal();
        pairs.push(("AFFORDANCE_TIMEOUT", "0s"));
        assert!(compose(&pairs).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
[server]
port = 9000
host = "127.0.0.1"

[discord]
application_id = "from-file"
public_key = "cd"
channel_id = 42

[overseerr]
url = "http://file:5055"
api_key = "file-key"

[interactions]
affordance_timeout = "5m"
"#
        )
        .expect("write config");

        let mut pairs = vec![("SERVER_PORT", "7000"), ("OVERSEERR_API_KEY", "env-key")];
        pairs.push(("DISCORD_CHANNEL_ID", "7"));

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_from_env(env(&pairs), false)
            .expect("config");
        let config = load.config;

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.discord.application_id, "from-file");
        assert_eq!(config.discord.channel_id, Some(7));
        assert_eq!(config.overseerr.url, "http://file:5055");
        assert_eq!(config.overseerr.api_key, "env-key");
        assert_eq!(
            config.interactions.affordance_timeout,
            Duration::from_secs(300)
        );
        assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let result = ConfigLoader::new()
            .with_config_path("/definitely/not/here/fetcherr.toml")
            .load_from_env(env(&minimal()), false);

        assert!(matches!(result, Err(ConfigLoadError::MissingConfig { .. })));
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let mut pairs = minimal();
        pairs.push(("DISCORD_BOT_TOKEN", "bot-secret"));
        let config = compose(&pairs).expect("config").config;

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("bot-secret"));
        assert!(!rendered.contains("\"secret\""));
    }
}
