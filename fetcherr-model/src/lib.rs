//! Core data model definitions shared across Fetcherr crates.
#![allow(missing_docs)]

pub mod ids;
pub mod media_type;
pub mod numbers;
pub mod requester;
pub mod search;
pub mod status;

pub use ids::TmdbId;
pub use media_type::MediaType;
pub use numbers::SeasonNumber;
pub use requester::Requester;
pub use search::{SearchResult, SeasonState, StatusData};
pub use status::UnitStatus;
