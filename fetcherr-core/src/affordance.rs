use fetcherr_model::{SearchResult, TmdbId};

use crate::{
    action::{ActionToken, RequestIntent},
    requestability::Requestability,
};

/// Season buttons offered per result, on top of "all remaining".
pub const MAX_SEASON_AFFORDANCES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffordanceStyle {
    /// Whole-title requests
    Success,
    /// Single-season requests
    Primary,
}

/// Presentation-neutral description of one request button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    pub label: String,
    pub style: AffordanceStyle,
    pub intent: RequestIntent,
    pub token: ActionToken,
}

impl Affordance {
    fn new(
        label: impl Into<String>,
        style: AffordanceStyle,
        intent: RequestIntent,
    ) -> Self {
        Self {
            label: label.into(),
            style,
            intent,
            token: intent.encode(),
        }
    }
}

/// Plans the request buttons of a result.
///
/// Tokens are unique per render: a movie yields at most one, a series one
/// "all remaining" plus one per season of a deduplicated set.
pub fn plan_affordances(
    result: &SearchResult,
    requestability: &Requestability,
) -> Vec<Affordance> {
    plan_for_id(result.id, requestability)
}

pub fn plan_for_id(
    id: TmdbId,
    requestability: &Requestability,
) -> Vec<Affordance> {
    match requestability {
        Requestability::Movie { requestable: true } => vec![Affordance::new(
            "Request Movie",
            AffordanceStyle::Success,
            RequestIntent::Movie(id),
        )],
        Requestability::Movie { requestable: false } => Vec::new(),
        Requestability::Series { seasons } if seasons.is_empty() => Vec::new(),
        Requestability::Series { seasons } => {
            let mut affordances = Vec::with_capacity(
                1 + seasons.len().min(MAX_SEASON_AFFORDANCES),
            );
            affordances.push(Affordance::new(
                "Request All Remaining",
                AffordanceStyle::Success,
                RequestIntent::AllSeasons(id),
            ));
            affordances.extend(seasons.iter().take(MAX_SEASON_AFFORDANCES).map(
                |season| {
                    Affordance::new(
                        format!("Request Season {season}"),
                        AffordanceStyle::Primary,
                        RequestIntent::Season(id, *season),
                    )
                },
            ));
            affordances
        }
    }
}
