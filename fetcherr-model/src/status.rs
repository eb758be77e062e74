use std::fmt::{Display, Formatter};

/// Availability/request state of a movie or a single season.
///
/// The backend reports these as numeric codes 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitStatus {
    /// Nobody has asked for it yet, or the backend does not know it
    Unknown = 1,
    /// A request exists and awaits approval
    PendingRequest = 2,
    /// Approved and being fetched
    Processing = 3,
    /// Some of it is in the library
    PartiallyAvailable = 4,
    /// Fully in the library
    Available = 5,
}

impl UnitStatus {
    /// Strict mapping of a wire code; `None` for codes outside 1..=5.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(UnitStatus::Unknown),
            2 => Some(UnitStatus::PendingRequest),
            3 => Some(UnitStatus::Processing),
            4 => Some(UnitStatus::PartiallyAvailable),
            5 => Some(UnitStatus::Available),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }

    /// Only units nobody has requested yet can be requested.
    pub fn is_requestable(&self) -> bool {
        matches!(self, UnitStatus::Unknown)
    }
}

impl Display for UnitStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitStatus::Unknown => write!(f, "Unknown"),
            UnitStatus::PendingRequest => write!(f, "Pending"),
            UnitStatus::Processing => write!(f, "Processing"),
            UnitStatus::PartiallyAvailable => write!(f, "Partially Available"),
            UnitStatus::Available => write!(f, "Available"),
        }
    }
}
