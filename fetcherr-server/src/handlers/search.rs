use fetcherr_core::{SearchReport, model::Requester, search::search};
use tracing::{error, info, warn};

use crate::{
    AppState,
    discord::{
        Interaction, InteractionResponse, MessagePayload,
        commands::{QUERY_OPTION, SEARCH_COMMAND},
        render,
    },
};

/// Answers `/search`: refuses it outside the designated channel, otherwise
/// defers and posts the results as followups.
pub fn handle_command(
    state: &AppState,
    interaction: &Interaction,
) -> InteractionResponse {
    if interaction.command_name() != Some(SEARCH_COMMAND) {
        warn!(command = ?interaction.command_name(), "unknown command");
        return InteractionResponse::message(render::unknown_command());
    }

    if let Some(expected) = state.config.discord.channel_id
        && interaction.channel_snowflake() != Some(expected)
    {
        info!(
            channel = ?interaction.channel_id,
            "search refused outside the designated channel"
        );
        return InteractionResponse::message(render::wrong_channel());
    }

    let Some(query) = interaction
        .string_option(QUERY_OPTION)
        .map(str::trim)
        .filter(|query| !query.is_empty())
    else {
        return InteractionResponse::message(render::missing_query());
    };

    let requester = interaction.requester();
    info!(user = %requester.display_name, query = %query, "search requested");

    let state = state.clone();
    let token = interaction.token.clone();
    let query = query.to_string();
    tokio::spawn(async move {
        run_search(&state, &token, &query, &requester).await;
    });

    InteractionResponse::deferred(false)
}

/// Runs the search and delivers one followup per rendered result, or one
/// message saying why there are none.
pub async fn run_search(
    state: &AppState,
    interaction_token: &str,
    query: &str,
    requester: &Requester,
) {
    let messages: Vec<MessagePayload> =
        match search(state.backend.as_ref(), query).await {
            Ok(SearchReport::NoResults) => vec![render::no_results()],
            Ok(SearchReport::Results(results)) => results
                .iter()
                .map(|resolved| render::result_message(resolved, requester))
                .collect(),
            Err(err) => {
                error!(error = %err, query = %query, "search failed");
                vec![render::search_failed()]
            }
        };

    for message in &messages {
        if let Err(err) = state.followups.send(interaction_token, message).await
        {
            error!(error = %err, "failed to deliver search followup");
        }
    }
}
