//! Discord HTTP interactions: inbound verification and payloads, outbound
//! responses, followups and command registration.

pub mod client;
pub mod commands;
pub mod interaction;
pub mod render;
pub mod response;
pub mod verify;

pub use client::{DiscordClient, DiscordError, FollowupSink, RecordingFollowups};
pub use interaction::{Interaction, InteractionKind};
pub use response::{InteractionResponse, MessagePayload};
pub use verify::{SignatureError, SignatureVerifier};
