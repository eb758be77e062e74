use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use fetcherr_model::{SearchResult, TmdbId};
use tokio::sync::Mutex;

use super::{MediaBackend, RequestPayload, SubmissionResponse};
use crate::error::{BackendError, Result};

#[derive(Debug, Default)]
struct State {
    results: HashMap<String, Vec<SearchResult>>,
    seasons: HashMap<TmdbId, Vec<i64>>,
    response: Option<SubmissionResponse>,
    search_down: bool,
    seasons_down: bool,
    submit_down: bool,
    searches: Vec<String>,
    season_lookups: Vec<TmdbId>,
    submitted: Vec<RequestPayload>,
}

/// Scriptable backend kept in memory. Records every call it receives.
///
/// Unknown queries return no results, unknown series fail the season
/// lookup with a 404 and submissions answer `201 {}` unless told otherwise.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_results(
        &self,
        query: &str,
        results: Vec<SearchResult>,
    ) -> &Self {
        self.state
            .lock()
            .await
            .results
            .insert(query.trim().to_lowercase(), results);
        self
    }

    pub async fn with_seasons(&self, id: TmdbId, seasons: Vec<i64>) -> &Self {
        self.state.lock().await.seasons.insert(id, seasons);
        self
    }

    pub async fn respond_with(&self, response: SubmissionResponse) -> &Self {
        self.state.lock().await.response = Some(response);
        self
    }

    pub async fn fail_search(&self) -> &Self {
        self.state.lock().await.search_down = true;
        self
    }

    pub async fn fail_season_lookup(&self) -> &Self {
        self.state.lock().await.seasons_down = true;
        self
    }

    pub async fn fail_submit(&self) -> &Self {
        self.state.lock().await.submit_down = true;
        self
    }

    pub async fn searches(&self) -> Vec<String> {
        self.state.lock().await.searches.clone()
    }

    pub async fn season_lookups(&self) -> Vec<TmdbId> {
        self.state.lock().await.season_lookups.clone()
    }

    pub async fn submitted(&self) -> Vec<RequestPayload> {
        self.state.lock().await.submitted.clone()
    }
}

#[async_trait]
impl MediaBackend for InMemoryBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut guard = self.state.lock().await;
        guard.searches.push(query.to_string());
        if guard.search_down {
            return Err(BackendError::Unavailable("search is down".into()));
        }
        Ok(guard
            .results
            .get(&query.trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    async fn list_seasons(&self, id: TmdbId) -> Result<Vec<i64>> {
        let mut guard = self.state.lock().await;
        guard.season_lookups.push(id);
        if guard.seasons_down {
            return Err(BackendError::Unavailable(
                "season lookup is down".into(),
            ));
        }
        guard.seasons.get(&id).cloned().ok_or(BackendError::Status {
            status: 404,
            message: format!("series {id} not found"),
        })
    }

    async fn submit(
        &self,
        payload: &RequestPayload,
    ) -> Result<SubmissionResponse> {
        let mut guard = self.state.lock().await;
        if guard.submit_down {
            return Err(BackendError::Unavailable("submit is down".into()));
        }
        guard.submitted.push(payload.clone());
        Ok(guard.response.clone().unwrap_or_else(|| {
            SubmissionResponse::new(201, serde_json::json!({}))
        }))
    }
}
