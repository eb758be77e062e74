use std::fmt;

/// External (TMDB) identifier of a movie or series.
///
/// The backend keys both media types by their TMDB id, so a single id type
/// is shared; the media type travels alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TmdbId(pub u64);

impl TmdbId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TmdbId {
    fn from(id: u64) -> Self {
        TmdbId(id)
    }
}

impl fmt::Display for TmdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
