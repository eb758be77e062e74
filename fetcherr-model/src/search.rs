use crate::{MediaType, TmdbId};

/// Raw request state of one season as the backend reported it.
///
/// Numbers and codes are kept as reported; classification and filtering of
/// specials or malformed numbers happen downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonState {
    pub number: i64,
    pub status: Option<i64>,
}

impl SeasonState {
    pub fn new(number: i64, status: Option<i64>) -> Self {
        Self { number, status }
    }
}

/// Request state the backend attached to a search result.
///
/// Absent entirely (`SearchResult::status == None`) when the backend has
/// never tracked the title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusData {
    Movie {
        status: Option<i64>,
    },
    Series {
        /// Overall status of the series, shown when there is no per-season
        /// breakdown.
        status: Option<i64>,
        seasons: Vec<SeasonState>,
    },
}

/// One entry of a search, produced fresh per query and never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub id: TmdbId,
    pub media_type: MediaType,
    pub title: String,
    pub release_year: Option<i32>,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    /// Season numbers the result itself declares, independent of any
    /// request state.
    pub declared_seasons: Vec<i64>,
    pub status: Option<StatusData>,
}

impl SearchResult {
    /// TMDB page of the title, e.g. `https://www.themoviedb.org/tv/1399`.
    pub fn tmdb_url(&self) -> String {
        format!(
            "https://www.themoviedb.org/{}/{}",
            self.media_type.as_wire(),
            self.id
        )
    }

    pub fn display_title(&self) -> String {
        match self.release_year {
            Some(year) => format!("{} ({year})", self.title),
            None => format!("{} (Unknown)", self.title),
        }
    }
}
