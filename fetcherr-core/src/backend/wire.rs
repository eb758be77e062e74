//! Overseerr response shapes. Only the fields the bot reads are modelled;
//! everything is optional because the backend omits what it does not know.

use fetcherr_model::{
    MediaType, SearchResult, SeasonState, StatusData, TmdbId,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItem {
    pub id: Option<u64>,
    pub tmdb_id: Option<u64>,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub media_info: Option<MediaInfo>,
    pub seasons: Option<Vec<SeasonEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MediaInfo {
    pub status: Option<i64>,
    pub seasons: Option<Vec<SeasonEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SeasonEntry {
    pub season_number: Option<i64>,
    pub status: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TvDetails {
    pub seasons: Option<Vec<SeasonEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn year_of(date: Option<&str>) -> Option<i32> {
    date.and_then(|date| date.split('-').next())
        .filter(|year| !year.trim().is_empty())
        .and_then(|year| year.trim().parse().ok())
}

impl SearchItem {
    /// `None` for people and anything else that cannot be requested, and
    /// for entries without an id.
    pub fn into_result(self) -> Option<SearchResult> {
        let media_type = MediaType::from_wire(self.media_type.as_deref()?)?;
        let id = TmdbId(self.tmdb_id.or(self.id)?);

        let release_year = year_of(self.release_date.as_deref())
            .or_else(|| year_of(self.first_air_date.as_deref()));

        let status = self.media_info.map(|info| match media_type {
            MediaType::Movie => StatusData::Movie {
                status: info.status,
            },
            MediaType::Series => StatusData::Series {
                status: info.status,
                seasons: info
                    .seasons
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|entry| {
                        Some(SeasonState::new(entry.season_number?, entry.status))
                    })
                    .collect(),
            },
        });

        Some(SearchResult {
            id,
            media_type,
            title: self
                .title
                .or(self.name)
                .unwrap_or_else(|| "Untitled".to_string()),
            release_year,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path.filter(|path| !path.is_empty()),
            vote_average: self.vote_average,
            declared_seasons: self
                .seasons
                .unwrap_or_default()
                .into_iter()
                .filter_map(|entry| entry.season_number)
                .collect(),
            status,
        })
    }
}
