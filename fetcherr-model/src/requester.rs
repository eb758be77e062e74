/// The chat user who triggered a search or pressed a request button.
///
/// Used for attribution only; the backend authorises requests with the
/// bot's own API key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requester {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl Requester {
    pub fn new(
        display_name: impl Into<String>,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            avatar_url,
        }
    }
}
