use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use fetcherr_model::Requester;
use tracing::{error, warn};

use crate::{
    action::{ActionToken, RequestIntent},
    backend::MediaBackend,
    outcome::RequestOutcome,
    submit::RequestSubmitter,
};

/// How long rendered request buttons stay interactive.
pub const DEFAULT_AFFORDANCE_LIFETIME: Duration = Duration::from_secs(120);

/// Why an activation was refused before anything was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationRejection {
    UnknownAction,
    Expired,
}

/// Final answer of an accepted activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationReply {
    Outcome(RequestOutcome),
    BackendUnavailable,
}

/// Admits activated affordances and runs their requests.
#[derive(Debug, Clone, Copy)]
pub struct ActivationGate {
    lifetime: TimeDelta,
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::new(DEFAULT_AFFORDANCE_LIFETIME)
    }
}

impl ActivationGate {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime: TimeDelta::from_std(lifetime).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Decodes the token and checks the affordance is still live.
    ///
    /// `issued_at` is when the affordance was rendered; without it the
    /// affordance is taken to be live.
    pub fn admit(
        &self,
        token: &str,
        issued_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<RequestIntent, ActivationRejection> {
        let intent = ActionToken::decode(token).map_err(|err| {
            warn!(token = %token, error = %err, "unknown action token");
            ActivationRejection::UnknownAction
        })?;

        if let Some(issued_at) = issued_at
            && now.signed_duration_since(issued_at) > self.lifetime
        {
            return Err(ActivationRejection::Expired);
        }

        Ok(intent)
    }

    /// Submits an admitted intent and maps the answer. Backend failures end
    /// here as [`ActivationReply::BackendUnavailable`].
    pub async fn execute(
        &self,
        backend: &dyn MediaBackend,
        intent: &RequestIntent,
        requester: &Requester,
    ) -> ActivationReply {
        match RequestSubmitter::new(backend).submit(intent, requester).await {
            Ok(response) => {
                ActivationReply::Outcome(RequestOutcome::from(&response))
            }
            Err(err) => {
                error!(
                    error = %err,
                    media_id = %intent.external_id(),
                    "request submission failed"
                );
                ActivationReply::BackendUnavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use fetcherr_model::TmdbId;

    use super::*;
    use crate::backend::{InMemoryBackend, SubmissionResponse};

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn live_affordance_is_admitted() {
        let gate = ActivationGate::default();
        assert_eq!(
            gate.admit("req_movie_603", Some(at(0)), at(119)),
            Ok(RequestIntent::Movie(TmdbId(603)))
        );
        assert!(gate.admit("req_movie_603", Some(at(0)), at(120)).is_ok());
    }

    #[test]
    fn stale_affordance_is_expired() {
        let gate = ActivationGate::default();
        assert_eq!(
            gate.admit("req_movie_603", Some(at(0)), at(121)),
            Err(ActivationRejection::Expired)
        );
    }

    #[test]
    fn missing_issue_time_is_treated_as_live() {
        let gate = ActivationGate::new(Duration::from_secs(1));
        assert!(gate.admit("req_tv_all_1399", None, at(10_000)).is_ok());
    }

    #[test]
    fn malformed_token_is_unknown_even_when_expired() {
        let gate = ActivationGate::default();
        assert_eq!(
            gate.admit("req_movie_nope", Some(at(0)), at(10_000)),
            Err(ActivationRejection::UnknownAction)
        );
    }

    #[tokio::test]
    async fn backend_failure_becomes_unavailable() {
        let backend = InMemoryBackend::new();
        backend.fail_submit().await;

        let reply = ActivationGate::default()
            .execute(
                &backend,
                &RequestIntent::Movie(TmdbId(1)),
                &Requester::default(),
            )
            .await;

        assert_eq!(reply, ActivationReply::BackendUnavailable);
    }

    #[tokio::test]
    async fn conflict_is_reported_as_already_requested() {
        let backend = InMemoryBackend::new();
        backend
            .respond_with(SubmissionResponse::new(
                409,
                serde_json::json!({"message": "Request for this media already exists."}),
            ))
            .await;

        let reply = ActivationGate::default()
            .execute(
                &backend,
                &RequestIntent::Movie(TmdbId(1)),
                &Requester::default(),
            )
            .await;

        assert_eq!(
            reply,
            ActivationReply::Outcome(
                RequestOutcome::AlreadyRequestedOrAvailable
            )
        );
    }
}
