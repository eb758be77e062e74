use std::{fmt, time::Duration};

use async_trait::async_trait;
use fetcherr_model::{SearchResult, TmdbId};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use url::Url;

use super::{
    MediaBackend, RequestPayload, SubmissionResponse,
    wire::{ErrorBody, SearchPage, TvDetails},
};
use crate::error::{BackendError, Result};

const API_KEY_HEADER: &str = "X-Api-Key";

/// Upper bound on a single call to the backend, connect to last byte.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// reqwest-backed client for the Overseerr (or Jellyseerr) v1 API.
pub struct OverseerrClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for OverseerrClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverseerrClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OverseerrClient {
    /// * `base_url` - Instance root, e.g. `http://overseerr:5055`. A trailing
    ///   slash or sub-path is fine.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// A stalled call fails with [`BackendError::Network`] once `timeout`
    /// has elapsed.
    pub fn with_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fetcherr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(http, base_url, api_key)
    }

    /// Reuses an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())?;
        let base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    async fn get_json<Q, T>(&self, url: &str, query: &Q) -> Result<T>
    where
        Q: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| BackendError::Parse(err.to_string()));
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                format!("Overseerr request failed with status {status}")
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(BackendError::InvalidApiKey)
            }
            _ => Err(BackendError::Status {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl MediaBackend for OverseerrClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        info!(query = %query, "querying Overseerr");
        let page: SearchPage = self
            .get_json(
                &self.endpoint("search"),
                &[("query", query.trim()), ("page", "1"), ("language", "en")],
            )
            .await?;

        let total = page.results.len();
        let results: Vec<SearchResult> = page
            .results
            .into_iter()
            .filter_map(|item| item.into_result())
            .collect();
        debug!(total, requestable = results.len(), "search results parsed");
        Ok(results)
    }

    async fn list_seasons(&self, id: TmdbId) -> Result<Vec<i64>> {
        let details: TvDetails = self
            .get_json(&self.endpoint(&format!("tv/{id}")), &[] as &[(&str, &str)])
            .await?;
        Ok(details
            .seasons
            .unwrap_or_default()
            .into_iter()
            .filter_map(|season| season.season_number)
            .collect())
    }

    async fn submit(
        &self,
        payload: &RequestPayload,
    ) -> Result<SubmissionResponse> {
        info!(
            media_type = payload.media_type.as_wire(),
            media_id = %payload.media_id,
            seasons = ?payload.seasons,
            "submitting request to Overseerr"
        );
        let response = self
            .http
            .post(self.endpoint("request"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text)
            .unwrap_or(serde_json::Value::String(text));

        if !matches!(status, 201 | 409) {
            error!(status, body = %body, "Overseerr request failed");
        }
        Ok(SubmissionResponse::new(status, body))
    }
}
