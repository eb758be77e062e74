use serde_json::Value;

use crate::backend::SubmissionResponse;

/// Shown when a failed submission carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Created,
    AlreadyRequestedOrAvailable,
    Failed(String),
}

impl RequestOutcome {
    /// Interprets a submission answer. 201 is a new request and 409 means
    /// the backend already has it; any other status is a failure, described
    /// by the body's `message` field when it has one.
    pub fn from_response(status: u16, body: &Value) -> Self {
        match status {
            201 => RequestOutcome::Created,
            409 => RequestOutcome::AlreadyRequestedOrAvailable,
            _ => RequestOutcome::Failed(
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            ),
        }
    }
}

impl From<&SubmissionResponse> for RequestOutcome {
    fn from(response: &SubmissionResponse) -> Self {
        RequestOutcome::from_response(response.status, &response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_and_conflict_map_directly() {
        assert_eq!(
            RequestOutcome::from_response(201, &json!({})),
            RequestOutcome::Created
        );
        assert_eq!(
            RequestOutcome::from_response(409, &json!({"message": "x"})),
            RequestOutcome::AlreadyRequestedOrAvailable
        );
    }

    #[test]
    fn failures_carry_the_backend_message() {
        assert_eq!(
            RequestOutcome::from_response(500, &json!({"message": "boom"})),
            RequestOutcome::Failed("boom".into())
        );
    }

    #[test]
    fn failures_without_message_use_the_fallback() {
        let fallback = RequestOutcome::Failed(GENERIC_FAILURE_MESSAGE.into());
        assert_eq!(RequestOutcome::from_response(500, &json!({})), fallback);
        assert_eq!(
            RequestOutcome::from_response(403, &json!({"message": 17})),
            fallback
        );
        assert_eq!(
            RequestOutcome::from_response(502, &json!("Bad Gateway")),
            fallback
        );
        assert_eq!(RequestOutcome::from_response(200, &Value::Null), fallback);
    }
}
