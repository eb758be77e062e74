//! HTTP interactions endpoint for the Fetcherr Discord bot.
//!
//! Discord posts every slash command and button press to
//! `POST /interactions`. Requests are verified against the application's
//! Ed25519 key, acknowledged within Discord's deadline, and answered with
//! followup messages once the Overseerr backend has replied.

pub mod discord;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_router;
