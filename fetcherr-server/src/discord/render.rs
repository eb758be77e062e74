//! Turns search reports and request outcomes into chat messages.

use fetcherr_core::{
    ActivationRejection, ActivationReply, Affordance, AffordanceStyle,
    RequestOutcome, ResolvedResult,
    model::{MediaType, Requester, SearchResult, SeasonState, StatusData, UnitStatus},
};

use super::response::{
    ActionRow, Button, ButtonStyle, Embed, EmbedField, EmbedFooter, EmbedImage,
    MessagePayload,
};

pub const OVERVIEW_LIMIT: usize = 350;
pub const BUTTONS_PER_ROW: usize = 5;
pub const MAX_ROWS: usize = 5;

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

const BLUE: u32 = 0x3498db;
const PURPLE: u32 = 0x9b59b6;
const RED: u32 = 0xe74c3c;
const ORANGE: u32 = 0xe67e22;

const NOT_REQUESTED: &str = "⚫ Not Requested";

pub fn result_message(
    resolved: &ResolvedResult,
    requester: &Requester,
) -> MessagePayload {
    MessagePayload::embed(result_embed(&resolved.result, requester))
        .with_components(button_rows(&resolved.affordances))
}

pub fn result_embed(result: &SearchResult, requester: &Requester) -> Embed {
    let tmdb_url = result.tmdb_url();
    let color = match result.media_type {
        MediaType::Movie => BLUE,
        MediaType::Series => PURPLE,
    };
    let rating = result
        .vote_average
        .map(|vote| format!("{vote:.1}/10"))
        .unwrap_or_else(|| "N/A".to_string());
    let kind = match result.media_type {
        MediaType::Movie => "Movie",
        MediaType::Series => "Series",
    };

    let mut fields = vec![
        EmbedField::inline("Type", kind),
        EmbedField::inline("Rating", rating),
        EmbedField::inline("TMDb", format!("[Link]({tmdb_url})")),
    ];
    let mut status = EmbedField::inline("Status", status_text(result));
    // Season lines are long; give them a row of their own.
    status.inline = result.media_type == MediaType::Movie;
    fields.push(status);

    Embed {
        title: Some(result.display_title()),
        description: Some(truncate(&result.overview, OVERVIEW_LIMIT)),
        url: Some(tmdb_url),
        color: Some(color),
        thumbnail: result.poster_path.as_ref().map(|path| EmbedImage {
            url: format!("{POSTER_BASE}{path}"),
        }),
        fields,
        footer: requester.avatar_url.as_ref().map(|icon| EmbedFooter {
            text: format!("Requested by {}", requester.display_name),
            icon_url: Some(icon.clone()),
        }),
    }
}

fn status_text(result: &SearchResult) -> String {
    match &result.status {
        None => NOT_REQUESTED.to_string(),
        Some(StatusData::Series { seasons, .. }) if !seasons.is_empty() => {
            season_line(seasons)
        }
        Some(StatusData::Movie { status } | StatusData::Series { status, .. }) => {
            (*status)
                .and_then(UnitStatus::from_code)
                .map(status_label)
                .unwrap_or("Unknown")
                .to_string()
        }
    }
}

fn status_label(status: UnitStatus) -> &'static str {
    match status {
        UnitStatus::Available => "🟢 Available",
        UnitStatus::PartiallyAvailable => "🟡 Partially Available",
        UnitStatus::Processing => "🔵 Processing",
        UnitStatus::PendingRequest => "🟣 Pending",
        UnitStatus::Unknown => "⚫ Unknown",
    }
}

fn season_emoji(code: Option<i64>) -> &'static str {
    match code.map(UnitStatus::from_code) {
        None | Some(Some(UnitStatus::Unknown)) => "⚫",
        Some(Some(UnitStatus::PendingRequest)) => "🟣",
        Some(Some(UnitStatus::Processing)) => "🔵",
        Some(Some(UnitStatus::PartiallyAvailable)) => "🟡",
        Some(Some(UnitStatus::Available)) => "🟢",
        Some(None) => "❔",
    }
}

/// One emoji per season in season order, specials left out.
pub fn season_line(seasons: &[SeasonState]) -> String {
    let mut sorted: Vec<_> =
        seasons.iter().filter(|season| season.number > 0).collect();
    sorted.sort_by_key(|season| season.number);

    if sorted.is_empty() {
        return "No season data".to_string();
    }
    sorted
        .iter()
        .map(|season| format!("{} S{}", season_emoji(season.status), season.number))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lays buttons out in rows of [`BUTTONS_PER_ROW`], dropping whatever does
/// not fit in [`MAX_ROWS`].
pub fn button_rows(affordances: &[Affordance]) -> Vec<ActionRow> {
    affordances
        .chunks(BUTTONS_PER_ROW)
        .take(MAX_ROWS)
        .map(|chunk| ActionRow::new(chunk.iter().map(button).collect()))
        .collect()
}

fn button(affordance: &Affordance) -> Button {
    let style = match affordance.style {
        AffordanceStyle::Success => ButtonStyle::Success,
        AffordanceStyle::Primary => ButtonStyle::Primary,
    };
    Button::new(style, &affordance.label, affordance.token.as_str())
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

pub fn no_results() -> MessagePayload {
    MessagePayload::embed(Embed {
        title: Some("No Results".to_string()),
        color: Some(ORANGE),
        ..Embed::default()
    })
}

pub fn search_failed() -> MessagePayload {
    MessagePayload::embed(Embed {
        title: Some("API Error".to_string()),
        color: Some(RED),
        ..Embed::default()
    })
}

pub fn wrong_channel() -> MessagePayload {
    MessagePayload::text(
        "This command can only be used in the designated channel.",
    )
    .ephemeral()
}

pub fn missing_query() -> MessagePayload {
    MessagePayload::text("Please provide something to search for.").ephemeral()
}

pub fn unknown_command() -> MessagePayload {
    MessagePayload::text("Unknown command.").ephemeral()
}

pub fn rejection(rejection: ActivationRejection) -> MessagePayload {
    let text = match rejection {
        ActivationRejection::UnknownAction => "Unknown action.",
        ActivationRejection::Expired => {
            "⌛ These buttons have expired. Run /search again to request."
        }
    };
    MessagePayload::text(text).ephemeral()
}

pub fn activation_reply(reply: &ActivationReply) -> MessagePayload {
    let text = match reply {
        ActivationReply::Outcome(RequestOutcome::Created) => {
            "✅ Request successful!".to_string()
        }
        ActivationReply::Outcome(RequestOutcome::AlreadyRequestedOrAvailable) => {
            "⚠️ This is already requested or available.".to_string()
        }
        ActivationReply::Outcome(RequestOutcome::Failed(message)) => {
            format!("❌ Request failed: {message}")
        }
        ActivationReply::BackendUnavailable => {
            "⚠️ An error occurred while handling your request.".to_string()
        }
    };
    MessagePayload::text(text).ephemeral()
}
