/// Season number of a series. Always at least 1: season 0 is the
/// "specials" bucket, which is never offered for request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct SeasonNumber(u16);

impl SeasonNumber {
    /// Returns `None` for the specials season (0).
    pub fn new(num: u16) -> Option<Self> {
        (num > 0).then_some(SeasonNumber(num))
    }

    /// Accepts whatever integer the backend reported and keeps it only when
    /// it names a regular season.
    pub fn from_raw(raw: i64) -> Option<Self> {
        u16::try_from(raw).ok().and_then(Self::new)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SeasonNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for SeasonNumber {
    type Error = String;

    fn try_from(num: u16) -> Result<Self, Self::Error> {
        SeasonNumber::new(num)
            .ok_or_else(|| "season 0 is not a requestable season".to_string())
    }
}

impl From<SeasonNumber> for u16 {
    fn from(num: SeasonNumber) -> Self {
        num.0
    }
}
