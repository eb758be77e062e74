pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions,
    DEFAULT_DISCORD_API_BASE,
};
pub use models::{
    Config, ConfigMetadata, DiscordConfig, InteractionConfig, OverseerrConfig,
    ServerConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
