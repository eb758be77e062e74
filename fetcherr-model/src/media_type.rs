use std::fmt::{Display, Formatter};

/// Media types the request backend can fulfil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaType {
    /// Movie media type
    Movie,
    /// Series media type, `tv` on the wire
    #[cfg_attr(feature = "serde", serde(rename = "tv"))]
    Series,
}

impl MediaType {
    /// Tag used by the backend API (`movie` / `tv`).
    pub fn as_wire(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }

    /// Parses the backend's tag. Anything else (`person`, ...) is not a
    /// requestable media type.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Series),
            _ => None,
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Series => write!(f, "Series"),
        }
    }
}
