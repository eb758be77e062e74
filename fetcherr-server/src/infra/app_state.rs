use std::{fmt, sync::Arc};

use anyhow::Context;
use fetcherr_core::{ActivationGate, MediaBackend, OverseerrClient};

use crate::discord::{DiscordClient, FollowupSink, SignatureVerifier};
use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn MediaBackend>,
    pub followups: Arc<dyn FollowupSink>,
    pub verifier: Arc<SignatureVerifier>,
    pub gate: ActivationGate,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the state from explicit collaborators.
    pub fn new(
        config: Config,
        verifier: SignatureVerifier,
        backend: Arc<dyn MediaBackend>,
        followups: Arc<dyn FollowupSink>,
    ) -> Self {
        let gate = ActivationGate::new(config.interactions.affordance_timeout);
        Self {
            config: Arc::new(config),
            backend,
            followups,
            verifier: Arc::new(verifier),
            gate,
        }
    }

    /// Builds the production state: Overseerr as backend and the Discord
    /// webhook API for followups.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let verifier = SignatureVerifier::from_hex(&config.discord.public_key)
            .context("DISCORD_PUBLIC_KEY is not a valid ed25519 public key")?;
        let backend =
            OverseerrClient::new(&config.overseerr.url, &config.overseerr.api_key)
                .context("failed to build Overseerr client")?;
        let followups = DiscordClient::new(
            &config.discord.api_base,
            &config.discord.application_id,
            config.discord.bot_token.clone(),
        )
        .context("failed to build Discord client")?;

        Ok(Self::new(
            config,
            verifier,
            Arc::new(backend),
            Arc::new(followups),
        ))
    }
}
