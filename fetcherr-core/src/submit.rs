use fetcherr_model::{Requester, SeasonNumber};
use tracing::info;

use crate::{
    action::RequestIntent,
    backend::{MediaBackend, RequestPayload, SubmissionResponse},
    error::Result,
};

/// Turns a decoded intent into exactly one submission call.
#[derive(Clone, Copy)]
pub struct RequestSubmitter<'a> {
    backend: &'a dyn MediaBackend,
}

impl std::fmt::Debug for RequestSubmitter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSubmitter").finish_non_exhaustive()
    }
}

impl<'a> RequestSubmitter<'a> {
    pub fn new(backend: &'a dyn MediaBackend) -> Self {
        Self { backend }
    }

    /// Builds the payload for an intent.
    ///
    /// "All seasons" is resolved against a fresh season list rather than
    /// whatever was rendered: every regular season is asked for and the
    /// backend skips the ones it already has. A failed lookup fails the
    /// whole request.
    pub async fn build_payload(
        &self,
        intent: &RequestIntent,
    ) -> Result<RequestPayload> {
        Ok(match *intent {
            RequestIntent::Movie(id) => RequestPayload::movie(id),
            RequestIntent::Season(id, season) => {
                RequestPayload::series(id, vec![season.value()])
            }
            RequestIntent::AllSeasons(id) => {
                let mut seasons: Vec<u16> = self
                    .backend
                    .list_seasons(id)
                    .await?
                    .into_iter()
                    .filter_map(SeasonNumber::from_raw)
                    .map(|season| season.value())
                    .collect();
                seasons.sort_unstable();
                seasons.dedup();
                RequestPayload::series(id, seasons)
            }
        })
    }

    /// Submits the request and hands back the raw answer. No retries.
    pub async fn submit(
        &self,
        intent: &RequestIntent,
        requester: &Requester,
    ) -> Result<SubmissionResponse> {
        let payload = self.build_payload(intent).await?;
        info!(
            requester = %requester.display_name,
            kind = ?intent.kind(),
            media_id = %intent.external_id(),
            "submitting media request"
        );
        self.backend.submit(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use fetcherr_model::{MediaType, TmdbId};

    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::error::BackendError;

    fn requester() -> Requester {
        Requester::new("leto", None)
    }

    #[tokio::test]
    async fn movie_payload_has_no_seasons() {
        let backend = InMemoryBackend::new();
        let submitter = RequestSubmitter::new(&backend);

        let response = submitter
            .submit(&RequestIntent::Movie(TmdbId(603)), &requester())
            .await
            .expect("submit");

        assert_eq!(response.status, 201);
        assert_eq!(backend.submitted().await, vec![RequestPayload::movie(TmdbId(603))]);
        assert!(backend.season_lookups().await.is_empty());
    }

    #[tokio::test]
    async fn single_season_is_sent_as_is() {
        let backend = InMemoryBackend::new();
        let season = SeasonNumber::new(4).unwrap();

        RequestSubmitter::new(&backend)
            .submit(&RequestIntent::Season(TmdbId(1399), season), &requester())
            .await
            .expect("submit");

        let submitted = backend.submitted().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].media_type, MediaType::Series);
        assert_eq!(submitted[0].seasons, Some(vec![4]));
        assert!(backend.season_lookups().await.is_empty());
    }

    #[tokio::test]
    async fn all_seasons_uses_the_live_list_without_specials() {
        let backend = InMemoryBackend::new();
        backend.with_seasons(TmdbId(1399), vec![3, 0, 1, 2, 2]).await;

        RequestSubmitter::new(&backend)
            .submit(&RequestIntent::AllSeasons(TmdbId(1399)), &requester())
            .await
            .expect("submit");

        assert_eq!(backend.season_lookups().await, vec![TmdbId(1399)]);
        assert_eq!(
            backend.submitted().await,
            vec![RequestPayload::series(TmdbId(1399), vec![1, 2, 3])]
        );
    }

    #[tokio::test]
    async fn failed_season_lookup_submits_nothing() {
        let backend = InMemoryBackend::new();
        backend.fail_season_lookup().await;

        let result = RequestSubmitter::new(&backend)
            .submit(&RequestIntent::AllSeasons(TmdbId(1399)), &requester())
            .await;

        assert!(matches!(result, Err(BackendError::Unavailable(_))));
        assert!(backend.submitted().await.is_empty());
    }

    #[tokio::test]
    async fn non_success_answers_are_returned_unmapped() {
        let backend = InMemoryBackend::new();
        backend
            .respond_with(SubmissionResponse::new(
                500,
                serde_json::json!({"message": "boom"}),
            ))
            .await;

        let response = RequestSubmitter::new(&backend)
            .submit(&RequestIntent::Movie(TmdbId(1)), &requester())
            .await
            .expect("a 500 is still an answer");

        assert_eq!(response.status, 500);
        assert_eq!(response.body["message"], "boom");
    }
}
