use chrono::Utc;
use fetcherr_core::{RequestIntent, model::Requester};
use tracing::{error, info};

use crate::{
    AppState,
    discord::{Interaction, InteractionResponse, render},
};

/// Answers a request button. Rejections are answered immediately and
/// privately; admitted requests are deferred and answered as a followup.
pub fn handle_component(
    state: &AppState,
    interaction: &Interaction,
) -> InteractionResponse {
    let custom_id = interaction.custom_id().unwrap_or_default();
    let intent =
        match state.gate.admit(custom_id, interaction.issued_at(), Utc::now()) {
            Ok(intent) => intent,
            Err(rejection) => {
                info!(custom_id = %custom_id, ?rejection, "activation rejected");
                return InteractionResponse::message(render::rejection(rejection));
            }
        };

    let requester = interaction.requester();
    info!(
        user = %requester.display_name,
        kind = ?intent.kind(),
        media_id = %intent.external_id(),
        "request activated"
    );

    let state = state.clone();
    let token = interaction.token.clone();
    tokio::spawn(async move {
        run_activation(&state, &token, &intent, &requester).await;
    });

    InteractionResponse::deferred(true)
}

pub async fn run_activation(
    state: &AppState,
    interaction_token: &str,
    intent: &RequestIntent,
    requester: &Requester,
) {
    let reply = state
        .gate
        .execute(state.backend.as_ref(), intent, requester)
        .await;
    let message = render::activation_reply(&reply);

    if let Err(err) = state.followups.send(interaction_token, &message).await {
        error!(error = %err, "failed to deliver request outcome");
    }
}
