//! The media-request backend the core talks to.

pub mod memory;
pub mod overseerr;
mod wire;

pub use memory::InMemoryBackend;
pub use overseerr::{DEFAULT_REQUEST_TIMEOUT, OverseerrClient};

use async_trait::async_trait;
use fetcherr_model::{MediaType, SearchResult, TmdbId};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Body of a request submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub media_type: MediaType,
    pub media_id: TmdbId,
    #[serde(rename = "is4k")]
    pub is_4k: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<u16>>,
}

impl RequestPayload {
    pub fn movie(id: TmdbId) -> Self {
        Self {
            media_type: MediaType::Movie,
            media_id: id,
            is_4k: false,
            seasons: None,
        }
    }

    pub fn series(id: TmdbId, seasons: Vec<u16>) -> Self {
        Self {
            media_type: MediaType::Series,
            media_id: id,
            is_4k: false,
            seasons: Some(seasons),
        }
    }
}

/// What the backend answered to a submission, before any interpretation.
///
/// Bodies that are not JSON are carried as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl SubmissionResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }
}

/// Search, season lookup and submission against the request backend.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Movie and series matches for `query`, in backend relevance order.
    /// Other media types (people, collections) are not returned.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Fresh season numbers of a series, exactly as the backend lists them.
    async fn list_seasons(&self, id: TmdbId) -> Result<Vec<i64>>;

    /// Sends one request. Any HTTP answer is a successful call; only
    /// transport failures are errors.
    async fn submit(
        &self,
        payload: &RequestPayload,
    ) -> Result<SubmissionResponse>;
}
