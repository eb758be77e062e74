//! Request orchestration core for Fetcherr.
//!
//! Turns backend search results into request affordances and turns an
//! activated affordance back into a request:
//!
//! - [`status`] classifies backend status codes,
//! - [`requestability`] derives which units may still be requested,
//! - [`affordance`] plans the buttons for a result,
//! - [`action`] encodes and decodes the stateless action tokens,
//! - [`submit`] builds and sends the request payload,
//! - [`outcome`] maps the backend's answer to a user-facing outcome.
//!
//! [`search`] and [`activation`] tie these together for the two entry
//! points of the bot. The backend itself sits behind [`backend::MediaBackend`].
#![allow(missing_docs)]

pub mod action;
pub mod activation;
pub mod affordance;
pub mod backend;
pub mod error;
pub mod outcome;
pub mod requestability;
pub mod search;
pub mod status;
pub mod submit;

pub use action::{ActionKind, ActionToken, DecodeError, RequestIntent};
pub use activation::{
    ActivationGate, ActivationRejection, ActivationReply,
    DEFAULT_AFFORDANCE_LIFETIME,
};
pub use affordance::{Affordance, AffordanceStyle, plan_affordances};
pub use backend::{
    InMemoryBackend, MediaBackend, OverseerrClient, RequestPayload,
    SubmissionResponse,
};
pub use error::{BackendError, Result};
pub use outcome::{GENERIC_FAILURE_MESSAGE, RequestOutcome};
pub use requestability::Requestability;
pub use search::{MAX_RESULTS, ResolvedResult, SearchReport};
pub use submit::RequestSubmitter;

pub use fetcherr_model as model;
