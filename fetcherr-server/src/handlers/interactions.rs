use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use tracing::{debug, warn};

use crate::{
    AppState,
    discord::{
        Interaction, InteractionKind, InteractionResponse, SignatureError,
        verify::{SIGNATURE_HEADER, TIMESTAMP_HEADER},
    },
    handlers::{activation, search},
    infra::errors::{AppError, AppResult},
};

/// Entry point for every interaction Discord delivers over HTTP.
///
/// The signature is checked over the raw body before anything is parsed.
pub async fn interactions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<InteractionResponse>> {
    let signature = header(&headers, SIGNATURE_HEADER)?;
    let timestamp = header(&headers, TIMESTAMP_HEADER)?;
    state.verifier.verify(signature, timestamp, &body)?;

    let interaction: Interaction = serde_json::from_slice(&body)?;
    debug!(kind = interaction.kind, id = %interaction.id, "interaction received");

    let response = match interaction.kind() {
        Some(InteractionKind::Ping) => InteractionResponse::pong(),
        Some(InteractionKind::ApplicationCommand) => {
            search::handle_command(&state, &interaction)
        }
        Some(InteractionKind::MessageComponent) => {
            activation::handle_component(&state, &interaction)
        }
        _ => {
            warn!(kind = interaction.kind, "unsupported interaction type");
            return Err(AppError::bad_request("unsupported interaction type"));
        }
    };

    Ok(Json(response))
}

fn header<'a>(
    headers: &'a HeaderMap,
    name: &'static str,
) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(SignatureError::MissingHeader(name))
}
