use std::collections::BTreeSet;

use fetcherr_model::{
    MediaType, SearchResult, SeasonNumber, SeasonState, StatusData,
};

use crate::status::classify;

/// Units of a search result that may still be requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requestability {
    Movie { requestable: bool },
    /// Ascending, never contains season 0.
    Series { seasons: BTreeSet<SeasonNumber> },
}

impl Requestability {
    pub fn for_result(result: &SearchResult) -> Self {
        resolve(
            result.media_type,
            result.status.as_ref(),
            &result.declared_seasons,
        )
    }

    /// True when nothing can be requested.
    pub fn is_empty(&self) -> bool {
        match self {
            Requestability::Movie { requestable } => !requestable,
            Requestability::Series { seasons } => seasons.is_empty(),
        }
    }
}

/// Derives the requestable units of a result.
///
/// A movie is requestable when the backend has no status for it or the
/// status classifies as unknown. For a series, a present season list wins:
/// every season not yet requested is included. Without any request state
/// the backend has never seen the series, so every declared season is
/// included. Specials and malformed season numbers are dropped.
pub fn resolve(
    media_type: MediaType,
    status: Option<&StatusData>,
    declared_seasons: &[i64],
) -> Requestability {
    match media_type {
        MediaType::Movie => {
            let requestable = match status {
                None => true,
                Some(data) => classify(overall_status(data)).is_requestable(),
            };
            Requestability::Movie { requestable }
        }
        MediaType::Series => {
            let seasons = match status.and_then(season_list) {
                Some(states) => states
                    .iter()
                    .filter(|state| classify(state.status).is_requestable())
                    .filter_map(|state| SeasonNumber::from_raw(state.number))
                    .collect(),
                None => declared_seasons
                    .iter()
                    .copied()
                    .filter_map(SeasonNumber::from_raw)
                    .collect(),
            };
            Requestability::Series { seasons }
        }
    }
}

fn overall_status(data: &StatusData) -> Option<i64> {
    match data {
        StatusData::Movie { status } | StatusData::Series { status, .. } => {
            *status
        }
    }
}

fn season_list(data: &StatusData) -> Option<&[SeasonState]> {
    match data {
        StatusData::Series { seasons, .. } => Some(seasons),
        StatusData::Movie { .. } => None,
    }
}
