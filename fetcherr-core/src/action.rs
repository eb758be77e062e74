//! Stateless action tokens.
//!
//! A token fully determines the request it stands for, so nothing has to be
//! remembered between rendering a result and the user pressing one of its
//! buttons. Tokens look like `req_movie_603`, `req_tv_all_1399` and
//! `req_tv_1399_s2`; the format is private to this module and only
//! [`RequestIntent::encode`] / [`ActionToken::decode`] may rely on it.

use std::fmt;
use std::str::FromStr;

use fetcherr_model::{SeasonNumber, TmdbId};
use thiserror::Error;

const MOVIE_PREFIX: &str = "req_movie_";
const ALL_SEASONS_PREFIX: &str = "req_tv_all_";
const SEASON_PREFIX: &str = "req_tv_";
const SEASON_SEPARATOR: &str = "_s";

/// What pressing an affordance asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    RequestMovie,
    RequestAllUnits,
    RequestUnit,
}

/// A decoded request, the tagged form of (kind, external id, unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestIntent {
    Movie(TmdbId),
    AllSeasons(TmdbId),
    Season(TmdbId, SeasonNumber),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unrecognised action token: {0:?}")]
    UnknownPrefix(String),
    #[error("malformed number in action token: {0:?}")]
    MalformedNumber(String),
    #[error("action token is missing its season: {0:?}")]
    MissingSeason(String),
    #[error("season 0 cannot be requested")]
    SpecialsSeason,
    #[error("{kind:?} {unit} a unit")]
    UnitMismatch {
        kind: ActionKind,
        unit: &'static str,
    },
}

/// Opaque identifier carried by a rendered affordance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionToken(String);

impl RequestIntent {
    /// Builds an intent from its loose parts. Only
    /// [`ActionKind::RequestUnit`] takes a unit.
    pub fn from_parts(
        kind: ActionKind,
        id: TmdbId,
        unit: Option<SeasonNumber>,
    ) -> Result<Self, DecodeError> {
        match (kind, unit) {
            (ActionKind::RequestMovie, None) => Ok(RequestIntent::Movie(id)),
            (ActionKind::RequestAllUnits, None) => {
                Ok(RequestIntent::AllSeasons(id))
            }
            (ActionKind::RequestUnit, Some(season)) => {
                Ok(RequestIntent::Season(id, season))
            }
            (ActionKind::RequestUnit, None) => Err(DecodeError::UnitMismatch {
                kind,
                unit: "requires",
            }),
            (_, Some(_)) => Err(DecodeError::UnitMismatch {
                kind,
                unit: "does not take",
            }),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            RequestIntent::Movie(_) => ActionKind::RequestMovie,
            RequestIntent::AllSeasons(_) => ActionKind::RequestAllUnits,
            RequestIntent::Season(..) => ActionKind::RequestUnit,
        }
    }

    pub fn external_id(&self) -> TmdbId {
        match self {
            RequestIntent::Movie(id)
            | RequestIntent::AllSeasons(id)
            | RequestIntent::Season(id, _) => *id,
        }
    }

    pub fn unit(&self) -> Option<SeasonNumber> {
        match self {
            RequestIntent::Season(_, season) => Some(*season),
            _ => None,
        }
    }

    pub fn encode(&self) -> ActionToken {
        let raw = match self {
            RequestIntent::Movie(id) => format!("{MOVIE_PREFIX}{id}"),
            RequestIntent::AllSeasons(id) => {
                format!("{ALL_SEASONS_PREFIX}{id}")
            }
            RequestIntent::Season(id, season) => {
                format!("{SEASON_PREFIX}{id}{SEASON_SEPARATOR}{season}")
            }
        };
        ActionToken(raw)
    }
}

impl ActionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a token back into its intent. Anything that is not exactly a
    /// token produced by [`RequestIntent::encode`] is rejected.
    pub fn decode(raw: &str) -> Result<RequestIntent, DecodeError> {
        if let Some(rest) = raw.strip_prefix(MOVIE_PREFIX) {
            return Ok(RequestIntent::Movie(TmdbId(parse_number(rest, raw)?)));
        }
        // Checked before the bare series prefix, which it extends.
        if let Some(rest) = raw.strip_prefix(ALL_SEASONS_PREFIX) {
            return Ok(RequestIntent::AllSeasons(TmdbId(parse_number(
                rest, raw,
            )?)));
        }
        if let Some(rest) = raw.strip_prefix(SEASON_PREFIX) {
            let (id, season) = rest
                .split_once(SEASON_SEPARATOR)
                .ok_or_else(|| DecodeError::MissingSeason(raw.to_string()))?;
            let id = TmdbId(parse_number(id, raw)?);
            let season: u16 = parse_number(season, raw)?;
            let season =
                SeasonNumber::new(season).ok_or(DecodeError::SpecialsSeason)?;
            return Ok(RequestIntent::Season(id, season));
        }
        Err(DecodeError::UnknownPrefix(raw.to_string()))
    }
}

/// Canonical unsigned decimal only: no sign, no leading zeros, no
/// whitespace. Keeps every intent mapped to exactly one token.
fn parse_number<T: FromStr>(digits: &str, raw: &str) -> Result<T, DecodeError> {
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if !canonical {
        return Err(DecodeError::MalformedNumber(raw.to_string()));
    }
    digits
        .parse()
        .map_err(|_| DecodeError::MalformedNumber(raw.to_string()))
}

impl FromStr for RequestIntent {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionToken::decode(s)
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ActionToken> for String {
    fn from(token: ActionToken) -> Self {
        token.0
    }
}
