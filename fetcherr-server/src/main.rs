use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use fetcherr_server::{
    AppState, create_router,
    discord::{DiscordClient, commands},
    infra::config::{Config, ConfigLoad, ConfigLoader, ConfigLoaderOptions},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "fetcherr-server")]
#[command(about = "Discord bot that turns /search into Overseerr requests")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a fetcherr.toml configuration file
    #[arg(long, env = "FETCHERR_CONFIG")]
    config: Option<PathBuf>,

    /// Path to an env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the interactions endpoint (default)
    Serve,
    /// Register the slash commands with Discord and exit
    RegisterCommands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_runtime_config(&cli.serve)?;

    match cli.command {
        Some(Command::RegisterCommands) => register_commands(&config).await,
        Some(Command::Serve) | None => run_server(config).await,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: args.config.clone(),
        env_file: args.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "loaded configuration file");
    }
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    Ok(config)
}

async fn register_commands(config: &Config) -> anyhow::Result<()> {
    let client = DiscordClient::new(
        &config.discord.api_base,
        &config.discord.application_id,
        config.discord.bot_token.clone(),
    )?;
    let guild = config.discord.guild_id.as_deref();
    let registered = client
        .register_commands(guild, &commands::all_commands())
        .await
        .context("failed to register slash commands")?;

    info!(
        registered,
        scope = guild.unwrap_or("global"),
        "slash commands registered"
    );
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;
    info!(
        overseerr = %config.overseerr.url,
        channel = ?config.discord.channel_id,
        affordance_timeout = ?config.interactions.affordance_timeout,
        "starting fetcherr"
    );

    let state = AppState::from_config(config)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening for interactions on http://{addr}/interactions");
    axum::serve(listener, router).await?;

    Ok(())
}
